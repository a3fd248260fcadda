//! Shared error definitions for request primitives.

use thiserror::Error;

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building request primitives from loosely typed input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The mode string does not name a supported processing mode.
    #[error("invalid mode `{mode}`")]
    InvalidMode {
        /// The rejected mode string.
        mode: String,
    },

    /// The length tier index is outside the fixed percentage table.
    #[error("invalid length tier index {index}: expected 0, 1, or 2")]
    InvalidLengthTier {
        /// The rejected index.
        index: usize,
    },

    /// Model identifier failed validation.
    #[error("invalid model id `{id}`: {reason}")]
    InvalidModelId {
        /// The offending identifier string.
        id: String,
        /// Human-readable reason for rejection.
        reason: String,
    },
}
