//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure that can abort startup or shutdown
//! so `main` can propagate them with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: reborn_core::ConfigError,
    },

    /// Reading or writing the save failed.
    #[error("save error: {source}")]
    Save {
        /// The underlying save error.
        #[from]
        source: reborn_save::SaveError,
    },

    /// The API server failed to start or serve.
    #[error("observer error: {source}")]
    Observer {
        /// The underlying server error.
        #[from]
        source: reborn_observer::server::ServerError,
    },

    /// The log subscriber could not be installed.
    #[error("logging error: {message}")]
    Logging {
        /// Description of the failure.
        message: String,
    },
}
