//! Error types for decoding and storing saves.

/// A save record that cannot be turned back into a state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Fewer fields than the oldest supported layout.
    #[error("save record has {found} fields, at least {required} are required")]
    TooFewFields {
        /// Fields present in the record.
        found: usize,
        /// Fields every record must carry.
        required: usize,
    },

    /// A mandatory numeric field did not parse.
    #[error("save field {field} is not a valid number: {value:?}")]
    InvalidNumber {
        /// Name of the field.
        field: &'static str,
        /// The raw text found.
        value: String,
    },
}

/// Errors from a save store.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// Reading or writing the backing storage failed.
    #[error("save I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The stored record is malformed.
    #[error("save record is malformed: {source}")]
    Decode {
        /// The underlying decode error.
        #[from]
        source: DecodeError,
    },
}
