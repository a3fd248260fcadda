//! Shared client trait and request/response types.

use std::time::Duration;

use assist_primitives::ModelId;
use assist_prompts::ResponseSchema;
use async_trait::async_trait;
use thiserror::Error;

/// Result alias used by generation clients.
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Error type shared by generation clients.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Client is misconfigured or missing credentials.
    #[error("client not configured: {reason}")]
    Configuration {
        /// Additional context for the failure.
        reason: String,
    },

    /// The request could not be encoded or sent as built.
    #[error("invalid generation request: {reason}")]
    InvalidRequest {
        /// Reason describing why the request could not be processed.
        reason: String,
    },

    /// Transport-level failures (network, TLS, timeout).
    #[error("transport error: {reason}")]
    Transport {
        /// Additional context about the error.
        reason: String,
    },

    /// The service rejected the request due to rate limiting.
    #[error("rate limited (retry after {retry_after:?})")]
    RateLimited {
        /// Suggested delay before retrying, when the service provided one.
        retry_after: Option<Duration>,
    },

    /// The service returned a non-success status or an undecodable body.
    #[error("response error: {reason}")]
    Response {
        /// Additional context about the response failure.
        reason: String,
    },

    /// The service withheld output on content-policy grounds.
    #[error("response blocked: {reason}")]
    Blocked {
        /// Block or finish reason reported by the service.
        reason: String,
    },
}

impl AdapterError {
    /// Convenience constructor for configuration issues.
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for invalid requests.
    #[must_use]
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for transport failures.
    #[must_use]
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for response failures.
    #[must_use]
    pub fn response(reason: impl Into<String>) -> Self {
        Self::Response {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for content-policy blocks.
    #[must_use]
    pub fn blocked(reason: impl Into<String>) -> Self {
        Self::Blocked {
            reason: reason.into(),
        }
    }

    /// Short stable label for structured logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "configuration",
            Self::InvalidRequest { .. } => "invalid_request",
            Self::Transport { .. } => "transport",
            Self::RateLimited { .. } => "rate_limited",
            Self::Response { .. } => "response",
            Self::Blocked { .. } => "blocked",
        }
    }
}

/// Requested response format.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    /// Freeform text; the service's default.
    #[default]
    Text,
    /// JSON matching the declared schema.
    Json(ResponseSchema),
}

/// Generation parameters sent with a request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationConfig {
    response_format: ResponseFormat,
}

impl GenerationConfig {
    /// Configuration requesting freeform text.
    #[must_use]
    pub fn text() -> Self {
        Self::default()
    }

    /// Configuration requesting JSON that matches `schema`.
    #[must_use]
    pub fn json(schema: ResponseSchema) -> Self {
        Self {
            response_format: ResponseFormat::Json(schema),
        }
    }

    /// Returns the requested response format.
    #[must_use]
    pub fn response_format(&self) -> &ResponseFormat {
        &self.response_format
    }

    /// Returns the declared response schema, if JSON output was requested.
    #[must_use]
    pub fn response_schema(&self) -> Option<&ResponseSchema> {
        match &self.response_format {
            ResponseFormat::Json(schema) => Some(schema),
            ResponseFormat::Text => None,
        }
    }
}

/// A single-prompt generation request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    model: ModelId,
    prompt: String,
    config: GenerationConfig,
}

impl GenerationRequest {
    /// Creates a request for `model` with the given prompt and configuration.
    #[must_use]
    pub fn new(model: ModelId, prompt: impl Into<String>, config: GenerationConfig) -> Self {
        Self {
            model,
            prompt: prompt.into(),
            config,
        }
    }

    /// Returns the target model.
    #[must_use]
    pub fn model(&self) -> &ModelId {
        &self.model
    }

    /// Returns the prompt text.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Returns the generation configuration.
    #[must_use]
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }
}

/// Text produced by the service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationResponse {
    text: String,
}

impl GenerationResponse {
    /// Wraps generated text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Returns the generated text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consumes the response, returning the generated text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }
}

/// Trait implemented by generation-service clients.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Provider name used in logs (e.g. `gemini`).
    fn provider(&self) -> &'static str;

    /// Executes one request/response transaction.
    async fn generate(&self, request: GenerationRequest) -> AdapterResult<GenerationResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_config_declares_no_schema() {
        assert_eq!(GenerationConfig::text().response_format(), &ResponseFormat::Text);
        assert!(GenerationConfig::text().response_schema().is_none());
    }

    #[test]
    fn json_config_carries_schema() {
        let schema = ResponseSchema::object();
        let config = GenerationConfig::json(schema.clone());
        assert_eq!(config.response_schema(), Some(&schema));
    }

    #[test]
    fn error_kinds_are_stable() {
        assert_eq!(AdapterError::blocked("SAFETY").kind(), "blocked");
        assert_eq!(
            AdapterError::RateLimited { retry_after: None }.kind(),
            "rate_limited"
        );
    }
}
