//! Configuration loading and typed config structures for the Reborn
//! simulation.
//!
//! The canonical configuration lives in `reborn-config.yaml` at the working
//! directory. Every section and every key is optional; a missing file means
//! all defaults.

use std::path::Path;

use serde::Deserialize;

use crate::operator::MIN_TICK_INTERVAL_MS;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is outside its allowed range.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending key.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
///
/// Mirrors the structure of `reborn-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Tick and autosave timing, step bounds.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Where and when the game is saved.
    #[serde(default)]
    pub storage: StorageConfig,

    /// HTTP surface settings.
    #[serde(default)]
    pub observer: ObserverConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Run boundaries.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `REBORN_SAVE_PATH` overrides `storage.save_path`
    /// - `REBORN_OBSERVER_PORT` overrides `observer.port`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Load configuration from `path`, or use defaults if the file does
    /// not exist. Environment overrides apply either way.
    ///
    /// # Errors
    ///
    /// As [`from_file`](Self::from_file), except that a missing file is
    /// not an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::from_file(path);
        }
        let mut config = Self::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `REBORN_*` environment variable overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `REBORN_OBSERVER_PORT` is not a
    /// port number.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("REBORN_SAVE_PATH") {
            self.storage.save_path = val;
        }
        if let Ok(val) = std::env::var("REBORN_OBSERVER_PORT") {
            self.observer.port = val.parse().map_err(|e| ConfigError::Invalid {
                field: "observer.port",
                reason: format!("REBORN_OBSERVER_PORT={val}: {e}"),
            })?;
        }
        Ok(())
    }

    /// Check value ranges that the type system cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let engine = &self.engine;
        if engine.tick_interval_ms < MIN_TICK_INTERVAL_MS {
            return Err(invalid(
                "engine.tick_interval_ms",
                &format!("must be at least {MIN_TICK_INTERVAL_MS}"),
            ));
        }
        if engine.autosave_interval_ms == 0 {
            return Err(invalid("engine.autosave_interval_ms", "must be positive"));
        }
        if !engine.max_step_seconds.is_finite() || engine.max_step_seconds <= 0.0 {
            return Err(invalid(
                "engine.max_step_seconds",
                "must be a positive number",
            ));
        }
        if !engine.days_per_second.is_finite() || engine.days_per_second < 0.0 {
            return Err(invalid(
                "engine.days_per_second",
                "must be a non-negative number",
            ));
        }
        if self.storage.save_path.trim().is_empty() {
            return Err(invalid("storage.save_path", "must not be empty"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_owned(),
    }
}

/// Tick and autosave timing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EngineConfig {
    /// Real-time milliseconds between ticks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Milliseconds between autosaves.
    #[serde(default = "default_autosave_interval_ms")]
    pub autosave_interval_ms: u64,

    /// Upper bound of the elapsed time one tick may simulate.
    #[serde(default = "default_max_step_seconds")]
    pub max_step_seconds: f64,

    /// In-game days advanced per simulated second.
    #[serde(default = "default_days_per_second")]
    pub days_per_second: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            autosave_interval_ms: default_autosave_interval_ms(),
            max_step_seconds: default_max_step_seconds(),
            days_per_second: default_days_per_second(),
        }
    }
}

/// Save storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// Path of the save file.
    #[serde(default = "default_save_path")]
    pub save_path: String,

    /// Write a final save when the process shuts down.
    #[serde(default = "default_true")]
    pub save_on_shutdown: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            save_path: default_save_path(),
            save_on_shutdown: true,
        }
    }
}

/// HTTP surface settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ObserverConfig {
    /// Whether the HTTP server is started at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Bind address.
    #[serde(default = "default_observer_host")]
    pub host: String,

    /// Bind port.
    #[serde(default = "default_observer_port")]
    pub port: u16,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: default_observer_host(),
            port: default_observer_port(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Run boundaries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Maximum number of ticks before the run ends (0 = unlimited).
    #[serde(default)]
    pub max_ticks: u64,

    /// Maximum wall-clock seconds before the run ends (0 = unlimited).
    #[serde(default)]
    pub max_real_time_seconds: u64,
}

// ---------------------------------------------------------------------------
// Default value functions for serde
// ---------------------------------------------------------------------------

const fn default_tick_interval_ms() -> u64 {
    200
}

const fn default_autosave_interval_ms() -> u64 {
    5_000
}

const fn default_max_step_seconds() -> f64 {
    0.5
}

const fn default_days_per_second() -> f64 {
    1.0
}

fn default_save_path() -> String {
    "reborn-save.txt".to_owned()
}

fn default_observer_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_observer_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_true() -> bool {
    true
}
