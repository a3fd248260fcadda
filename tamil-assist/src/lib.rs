//! Tamil grammar correction and summarization.
//!
//! This facade bundles the workspace crates behind feature flags and adds
//! [`bootstrap`] helpers that wire configuration into a ready
//! [`kernel::TextProcessor`].
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = tamil_assist::config::AssistConfig::from_env()?;
//! let processor = tamil_assist::bootstrap::processor(&config)?;
//! let corrected = processor.process_text("அவள் படிக்கிறான்", "grammar", None).await?;
//! println!("{corrected}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs, clippy::pedantic)]

/// Re-export of the request primitives.
pub use assist_primitives as primitives;

/// Validation, instructions, and output contracts (enabled by `prompts` feature).
#[cfg(feature = "prompts")]
pub use assist_prompts as prompts;

/// Generation clients (enabled by `adapters` feature).
#[cfg(feature = "adapters")]
pub use assist_adapters as adapters;

/// Processing pipeline (enabled by `kernel` feature).
#[cfg(feature = "kernel")]
pub use assist_kernel as kernel;

/// Configuration loading (enabled by `config` feature).
#[cfg(feature = "config")]
pub use assist_config as config;

/// Logging setup (enabled by `telemetry` feature).
#[cfg(feature = "telemetry")]
pub use assist_telemetry as telemetry;

#[cfg(all(feature = "kernel", feature = "config"))]
pub mod bootstrap;
