//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Source [`std::io::Error`].
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for the schema.
    #[error("invalid config document: {source}")]
    Parse {
        /// Source [`serde_json::Error`].
        #[from]
        source: serde_json::Error,
    },

    /// A setting holds an unusable value.
    #[error("invalid value for {key}: {reason}")]
    InvalidValue {
        /// Setting or environment variable name.
        key: &'static str,
        /// Human-readable reason for rejection.
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key,
            reason: reason.into(),
        }
    }
}
