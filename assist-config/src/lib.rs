//! Configuration for Tamil text assist.
//!
//! [`AssistConfig`] is built from defaults, an optional JSON file, and
//! environment variables, in that order of precedence (environment wins).

#![warn(missing_docs, clippy::pedantic)]

mod error;
pub mod loader;
pub mod schema;

pub use error::{ConfigError, ConfigResult};
pub use schema::AssistConfig;
