//! Error types for the `reborn-progression` crate.

/// Reasons an upgrade purchase is refused.
///
/// The command layer turns every variant into a silent no-op; the variants
/// exist so the refusal can be logged and reported over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpgradeError {
    /// The catalog has no upgrade with this id.
    #[error("unknown upgrade: {id}")]
    UnknownUpgrade {
        /// The requested id.
        id: String,
    },

    /// The character cannot afford the next level.
    #[error("not enough echoes for {id}: cost {cost}, have {echoes}")]
    InsufficientEchoes {
        /// The requested upgrade.
        id: String,
        /// Price of the next level.
        cost: u64,
        /// Echoes on hand.
        echoes: u64,
    },
}
