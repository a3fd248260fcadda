//! Processing pipeline for Tamil grammar correction and summarization.
//!
//! [`TextProcessor`] validates input, renders the mode's instruction, selects
//! the output contract, calls the injected [`GenerationClient`], and unwraps
//! the response to a single string.
//!
//! [`GenerationClient`]: assist_adapters::traits::GenerationClient

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod processor;

pub use error::{GENERIC_FAILURE_MESSAGE, GenerationError, ProcessError, ProcessResult};
pub use processor::{PreparedCall, TextProcessor};
