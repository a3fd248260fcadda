//! Wiring from [`AssistConfig`] to a ready [`TextProcessor`].

use std::sync::Arc;

use assist_adapters::gemini::{GeminiClient, GeminiConfig};
use assist_adapters::traits::{AdapterError, GenerationClient};
use assist_config::{AssistConfig, ConfigError};
use assist_kernel::TextProcessor;
use thiserror::Error;
use tracing::info;

/// Errors raised while assembling the processor.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration could not be loaded or validated.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The generation client could not be constructed.
    #[error(transparent)]
    Client(#[from] AdapterError),
}

/// Builds the Gemini client described by `config`.
///
/// # Errors
///
/// Returns [`BootstrapError::Client`] if the API key is missing or the base
/// URL is invalid.
pub fn gemini_client(config: &AssistConfig) -> Result<GeminiClient, BootstrapError> {
    let mut gemini = GeminiConfig::new().with_base_url(config.base_url())?;
    if let Some(key) = config.api_key() {
        gemini = gemini.with_api_key(key);
    }
    if let Some(limit) = config.timeout() {
        gemini = gemini.with_timeout(limit);
    }
    Ok(GeminiClient::new(gemini)?)
}

/// Builds a processor backed by the configured Gemini client.
///
/// # Errors
///
/// Returns [`BootstrapError`] if the configuration is invalid or the client
/// cannot be constructed.
pub fn processor(config: &AssistConfig) -> Result<TextProcessor, BootstrapError> {
    config.validate()?;
    let client = gemini_client(config)?;
    info!(
        base_url = config.base_url(),
        timeout = ?config.timeout(),
        "generation client ready"
    );
    Ok(processor_with_client(config, Arc::new(client)))
}

/// Builds a processor around an existing client, applying the configured models.
#[must_use]
pub fn processor_with_client(
    config: &AssistConfig,
    client: Arc<dyn GenerationClient>,
) -> TextProcessor {
    TextProcessor::new(client).with_models(config.models())
}
