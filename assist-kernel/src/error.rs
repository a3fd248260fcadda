//! Error taxonomy for the processing pipeline.

use assist_adapters::traits::AdapterError;
use assist_prompts::{ContractError, TemplateError, ValidationError};
use thiserror::Error;

/// Message shown to the end user for every generation failure.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred while processing the request.";

/// Result alias for processing operations.
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Detailed cause of a failed generation, kept for diagnostics.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The instruction could not be rendered from its template.
    #[error("failed to render instruction: {0}")]
    Instruction(#[from] TemplateError),

    /// The generation service call failed.
    #[error("generation call failed: {0}")]
    Upstream(#[from] AdapterError),

    /// The response did not satisfy the output contract.
    #[error("generation response rejected: {0}")]
    Contract(#[from] ContractError),
}

impl GenerationError {
    /// Short stable label for structured logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Instruction(_) => "instruction",
            Self::Upstream(err) => err.kind(),
            Self::Contract(_) => "contract",
        }
    }
}

/// Errors returned to callers of the processor.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Input is not Tamil script. Raised before any external call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The mode string or length tier index is not supported. Raised before
    /// any external call.
    #[error(transparent)]
    Mode(#[from] assist_primitives::Error),

    /// Any failure from or after the generation call. Displays the generic
    /// message; the cause is available through [`std::error::Error::source`].
    #[error("{}", GENERIC_FAILURE_MESSAGE)]
    Generation(#[source] GenerationError),
}

impl ProcessError {
    /// Returns the message to present to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Returns the detailed generation cause, if this is a generation failure.
    #[must_use]
    pub fn generation_cause(&self) -> Option<&GenerationError> {
        match self {
            Self::Generation(cause) => Some(cause),
            Self::Validation(_) | Self::Mode(_) => None,
        }
    }
}
