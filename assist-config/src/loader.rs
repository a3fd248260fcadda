//! Configuration loaders: environment variables and JSON files.

use std::env;
use std::fs;
use std::path::Path;

use assist_primitives::ModelId;
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::schema::AssistConfig;

/// API key for the generation service.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Overrides the generation API root.
pub const BASE_URL_ENV: &str = "TAMIL_ASSIST_BASE_URL";
/// Overrides the standard model.
pub const MODEL_ENV: &str = "TAMIL_ASSIST_MODEL";
/// Overrides the alternate model.
pub const ALTERNATE_MODEL_ENV: &str = "TAMIL_ASSIST_ALTERNATE_MODEL";
/// Per-request timeout in whole seconds.
pub const TIMEOUT_SECS_ENV: &str = "TAMIL_ASSIST_TIMEOUT_SECS";
/// Log filter directive.
pub const LOG_FILTER_ENV: &str = "TAMIL_ASSIST_LOG";

impl AssistConfig {
    /// Loads configuration from defaults overridden by process environment
    /// variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable holds an unusable value.
    pub fn from_env() -> ConfigResult<Self> {
        Self::default().merge_env()
    }

    /// Parses a JSON configuration document. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields, and
    /// [`ConfigError::InvalidValue`] for values failing validation.
    pub fn from_json_str(document: &str) -> ConfigResult<Self> {
        let cfg: Self = serde_json::from_str(document)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// errors of [`AssistConfig::from_json_str`].
    pub fn from_json_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let document = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        Self::from_json_str(&document)
    }

    /// Loads the optional file, then applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns any error from reading the file or applying overrides.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let base = match path {
            Some(path) => Self::from_json_file(path)?,
            None => Self::default(),
        };
        base.merge_env()
    }

    /// Applies overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable holds an unusable value.
    pub fn merge_env(self) -> ConfigResult<Self> {
        self.merge_with(|key| env::var(key).ok())
    }

    /// Applies overrides from an arbitrary key lookup. Unset or blank values
    /// leave the current setting untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a value is unusable.
    pub fn merge_with<F>(mut self, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        if let Some(key) = get(API_KEY_ENV) {
            self = self.with_api_key(key);
        }
        if let Some(url) = get(BASE_URL_ENV) {
            self = self.with_base_url(url)?;
        }
        if let Some(model) = get(MODEL_ENV) {
            self = self.with_standard_model(parse_model(MODEL_ENV, model)?);
        }
        if let Some(model) = get(ALTERNATE_MODEL_ENV) {
            self = self.with_alternate_model(parse_model(ALTERNATE_MODEL_ENV, model)?);
        }
        if let Some(secs) = get(TIMEOUT_SECS_ENV) {
            let secs = secs.parse::<u64>().map_err(|err| {
                ConfigError::invalid(TIMEOUT_SECS_ENV, format!("`{secs}` is not a number: {err}"))
            })?;
            self = self.with_timeout_secs(secs)?;
        }
        if let Some(filter) = get(LOG_FILTER_ENV) {
            self = self.with_log_filter(filter);
        }

        Ok(self)
    }
}

fn parse_model(key: &'static str, value: String) -> ConfigResult<ModelId> {
    ModelId::new(value).map_err(|err| ConfigError::invalid(key, err.to_string()))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use assist_primitives::ModelVariant;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn env_overrides_defaults() {
        let cfg = AssistConfig::default()
            .merge_with(lookup(&[
                (API_KEY_ENV, "key-123"),
                (MODEL_ENV, "gemini-2.0-flash"),
                (TIMEOUT_SECS_ENV, "30"),
                (LOG_FILTER_ENV, "debug"),
            ]))
            .unwrap();

        assert_eq!(cfg.api_key(), Some("key-123"));
        assert_eq!(
            cfg.models().model_for(ModelVariant::Standard).as_str(),
            "gemini-2.0-flash"
        );
        assert_eq!(
            cfg.models().model_for(ModelVariant::Alternate).as_str(),
            "gemini-1.5-pro"
        );
        assert_eq!(cfg.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(cfg.log_filter(), "debug");
    }

    #[test]
    fn blank_values_are_ignored() {
        let cfg = AssistConfig::default()
            .merge_with(lookup(&[(API_KEY_ENV, "   "), (MODEL_ENV, "")]))
            .unwrap();
        assert_eq!(cfg, AssistConfig::default());
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = AssistConfig::default()
            .merge_with(lookup(&[(TIMEOUT_SECS_ENV, "soon")]))
            .expect_err("not a number");
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: TIMEOUT_SECS_ENV,
                ..
            }
        ));

        let err = AssistConfig::default()
            .merge_with(lookup(&[(ALTERNATE_MODEL_ENV, "models/pro")]))
            .expect_err("bad model id");
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: ALTERNATE_MODEL_ENV,
                ..
            }
        ));
    }

    #[test]
    fn json_document_fills_defaults() {
        let cfg = AssistConfig::from_json_str(
            r#"{"api_key": "file-key", "alternate_model": "gemini-2.0-pro", "timeout_secs": 20}"#,
        )
        .unwrap();
        assert_eq!(cfg.api_key(), Some("file-key"));
        assert_eq!(cfg.base_url(), crate::schema::DEFAULT_BASE_URL);
        assert_eq!(
            cfg.models().model_for(ModelVariant::Alternate).as_str(),
            "gemini-2.0-pro"
        );
        assert_eq!(cfg.timeout(), Some(Duration::from_secs(20)));
    }

    #[test]
    fn json_rejects_unknown_fields_and_bad_values() {
        assert!(matches!(
            AssistConfig::from_json_str(r#"{"model": "x"}"#),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            AssistConfig::from_json_str(r#"{"timeout_secs": 0}"#),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(AssistConfig::from_json_str(r#"{"standard_model": ""}"#).is_err());
    }

    #[test]
    fn env_wins_over_file_values() {
        let cfg = AssistConfig::from_json_str(r#"{"api_key": "file-key"}"#)
            .unwrap()
            .merge_with(lookup(&[(API_KEY_ENV, "env-key")]))
            .unwrap();
        assert_eq!(cfg.api_key(), Some("env-key"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = AssistConfig::from_json_file("/nonexistent/tamil-assist.json")
            .expect_err("missing file");
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
