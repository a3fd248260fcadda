//! Core shared types for Tamil text assist requests.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod mode;
mod models;

/// Error type and result alias shared across the workspace.
pub use error::{Error, Result};
/// Processing modes and the summary length table.
pub use mode::{LengthTier, Mode, ModelVariant};
/// Model identifiers used by each variant.
pub use models::{DEFAULT_ALTERNATE_MODEL, DEFAULT_STANDARD_MODEL, ModelId, ModelRoster};
