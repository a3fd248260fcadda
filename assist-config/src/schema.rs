//! Strongly typed configuration schema.

use std::fmt;
use std::time::Duration;

use assist_primitives::{ModelId, ModelRoster, ModelVariant};
use serde::Deserialize;

use crate::error::{ConfigError, ConfigResult};

/// Default generation API root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";

/// Default log filter directive.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Settings for the generation client, model selection, and logging.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssistConfig {
    api_key: Option<String>,
    base_url: String,
    standard_model: ModelId,
    alternate_model: ModelId,
    timeout_secs: Option<u64>,
    log_filter: String,
}

impl Default for AssistConfig {
    fn default() -> Self {
        let roster = ModelRoster::default();
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_owned(),
            standard_model: roster.model_for(ModelVariant::Standard).clone(),
            alternate_model: roster.model_for(ModelVariant::Alternate).clone(),
            timeout_secs: None,
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

impl fmt::Debug for AssistConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssistConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("standard_model", &self.standard_model)
            .field("alternate_model", &self.alternate_model)
            .field("timeout_secs", &self.timeout_secs)
            .field("log_filter", &self.log_filter)
            .finish()
    }
}

impl AssistConfig {
    /// Returns the API key, if configured. A blank key counts as unset.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }

    /// Returns the generation API root.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the model roster built from the configured identifiers.
    #[must_use]
    pub fn models(&self) -> ModelRoster {
        ModelRoster::new(self.standard_model.clone(), self.alternate_model.clone())
    }

    /// Returns the per-request timeout, if one is configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Returns the log filter directive.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the generation API root.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] unless the URL uses `http` or `https`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> ConfigResult<Self> {
        self.base_url = base_url.into();
        self.check_base_url()?;
        Ok(self)
    }

    /// Sets the model for the standard variant.
    #[must_use]
    pub fn with_standard_model(mut self, model: ModelId) -> Self {
        self.standard_model = model;
        self
    }

    /// Sets the model for the alternate variant.
    #[must_use]
    pub fn with_alternate_model(mut self, model: ModelId) -> Self {
        self.alternate_model = model;
        self
    }

    /// Sets the per-request timeout in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> ConfigResult<Self> {
        self.timeout_secs = Some(secs);
        self.check_timeout()?;
        Ok(self)
    }

    /// Sets the log filter directive.
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Checks cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a non-HTTP base URL or a zero timeout.
    pub fn validate(&self) -> ConfigResult<()> {
        self.check_base_url()?;
        self.check_timeout()
    }

    fn check_base_url(&self) -> ConfigResult<()> {
        let url = self.base_url.trim();
        if url.starts_with("https://") || url.starts_with("http://") {
            Ok(())
        } else {
            Err(ConfigError::invalid(
                "base_url",
                format!("`{url}` must start with http:// or https://"),
            ))
        }
    }

    fn check_timeout(&self) -> ConfigResult<()> {
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::invalid(
                "timeout_secs",
                "timeout must be at least one second",
            ));
        }
        Ok(())
    }
}
