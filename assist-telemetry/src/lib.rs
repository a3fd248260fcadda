//! Logging setup.
//!
//! Installs a `tracing-subscriber` fmt layer writing to stderr, so stdout stays
//! free for command output. `RUST_LOG` takes precedence over the configured
//! filter.

#![warn(missing_docs, clippy::pedantic)]

use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Result alias for telemetry setup.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directive could not be parsed.
    #[error("invalid log filter `{directive}`: {reason}")]
    InvalidFilter {
        /// The rejected directive.
        directive: String,
        /// Parser message.
        reason: String,
    },

    /// A global subscriber was already installed.
    #[error("logging already initialised: {0}")]
    AlreadyInitialized(String),
}

/// Builds the filter: `RUST_LOG` when set and valid, otherwise `fallback`.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] if `fallback` is needed and does
/// not parse.
pub fn env_filter(fallback: &str) -> TelemetryResult<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    parse_filter(fallback)
}

fn parse_filter(directive: &str) -> TelemetryResult<EnvFilter> {
    EnvFilter::try_new(directive).map_err(|err| TelemetryError::InvalidFilter {
        directive: directive.to_owned(),
        reason: err.to_string(),
    })
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns [`TelemetryError`] if the filter is invalid or a subscriber is
/// already installed.
pub fn init(fallback_filter: &str) -> TelemetryResult<()> {
    let filter = env_filter(fallback_filter)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| TelemetryError::AlreadyInitialized(err.to_string()))?;
    debug!("logging initialised");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_level_and_target_directives() {
        assert!(parse_filter("info").is_ok());
        assert!(parse_filter("warn,assist_kernel=debug").is_ok());
    }

    #[test]
    fn rejects_malformed_directive() {
        let err = parse_filter("assist_kernel=loud").expect_err("bad level");
        assert!(matches!(err, TelemetryError::InvalidFilter { .. }));
    }

    #[test]
    fn second_init_reports_already_initialised() {
        let _ = init("info");
        assert!(matches!(
            init("info"),
            Err(TelemetryError::AlreadyInitialized(_))
        ));
    }
}
