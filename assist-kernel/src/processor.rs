//! Validate, prompt, generate, unwrap.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use assist_adapters::traits::{GenerationClient, GenerationConfig, GenerationRequest};
use assist_primitives::{Mode, ModelRoster};
use assist_prompts::{InstructionSet, OutputContract, validate};
use tracing::{debug, error, info, warn};

use crate::error::{GenerationError, ProcessError, ProcessResult};

/// A fully shaped request together with the contract used to unwrap its
/// response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedCall {
    request: GenerationRequest,
    contract: OutputContract,
}

impl PreparedCall {
    /// Returns the request that will be sent upstream.
    #[must_use]
    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }

    /// Returns the contract applied to the response.
    #[must_use]
    pub fn contract(&self) -> &OutputContract {
        &self.contract
    }
}

/// Turns Tamil input into a corrected sentence or a summary.
///
/// Holds only immutable configuration and a shared client, so one instance
/// can serve concurrent calls. Each call is a single request/response
/// transaction with no retries.
#[derive(Clone)]
pub struct TextProcessor {
    client: Arc<dyn GenerationClient>,
    models: ModelRoster,
    instructions: InstructionSet,
}

impl fmt::Debug for TextProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextProcessor")
            .field("provider", &self.client.provider())
            .field("models", &self.models)
            .finish_non_exhaustive()
    }
}

impl TextProcessor {
    /// Creates a processor using the default model roster and instructions.
    #[must_use]
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self {
            client,
            models: ModelRoster::default(),
            instructions: InstructionSet::default(),
        }
    }

    /// Overrides the models used for each variant.
    #[must_use]
    pub fn with_models(mut self, models: ModelRoster) -> Self {
        self.models = models;
        self
    }

    /// Overrides the instruction templates.
    #[must_use]
    pub fn with_instructions(mut self, instructions: InstructionSet) -> Self {
        self.instructions = instructions;
        self
    }

    /// Returns the configured model roster.
    #[must_use]
    pub fn models(&self) -> &ModelRoster {
        &self.models
    }

    /// Processes `text` using a wire mode string.
    ///
    /// `mode` is one of `"grammar"`, `"grammar-a"`, or `"summarize"`;
    /// `length_tier_index` selects the summary length (`0..=2`, default `1`)
    /// and is ignored for grammar modes.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::Mode`] for an unsupported mode or tier index,
    /// otherwise the same errors as [`TextProcessor::process`]. Mode errors are
    /// raised before any external call.
    pub async fn process_text(
        &self,
        text: &str,
        mode: &str,
        length_tier_index: Option<usize>,
    ) -> ProcessResult<String> {
        let mode = Mode::parse(mode, length_tier_index).inspect_err(|err| {
            warn!(error = %err, "rejected request with unsupported mode");
        })?;
        self.process(text, mode).await
    }

    /// Processes `text` in `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::Validation`] if the input is not Tamil script
    /// (no external call is made), or [`ProcessError::Generation`] for any
    /// failure during or after the generation call.
    pub async fn process(&self, text: &str, mode: Mode) -> ProcessResult<String> {
        if let Err(err) = validate(text) {
            warn!(mode = %mode, "rejected non-Tamil input");
            return Err(err.into());
        }

        let call = self
            .prepare(text, mode)
            .map_err(|err| Self::generation_failed(mode, err))?;

        info!(
            mode = %mode,
            model = %call.request.model(),
            provider = self.client.provider(),
            "processing request"
        );

        let started = Instant::now();
        match self.execute(call).await {
            Ok(output) => {
                info!(
                    mode = %mode,
                    elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                    output_chars = output.chars().count(),
                    "request completed"
                );
                Ok(output)
            }
            Err(err) => Err(Self::generation_failed(mode, err)),
        }
    }

    /// Builds the request and output contract for `mode` without calling the
    /// service. Does not validate `text`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Instruction`] if the instruction template
    /// cannot be rendered.
    pub fn prepare(&self, text: &str, mode: Mode) -> Result<PreparedCall, GenerationError> {
        let prompt = self.instructions.render(mode, text)?;
        let contract = OutputContract::for_mode(mode);
        let config = contract
            .schema()
            .map_or_else(GenerationConfig::text, |schema| {
                GenerationConfig::json(schema.clone())
            });
        let model = self.models.model_for(mode.model_variant()).clone();

        debug!(
            mode = %mode,
            structured = contract.schema().is_some(),
            "selected output contract"
        );

        Ok(PreparedCall {
            request: GenerationRequest::new(model, prompt, config),
            contract,
        })
    }

    async fn execute(&self, call: PreparedCall) -> Result<String, GenerationError> {
        let response = self.client.generate(call.request).await?;
        Ok(call.contract.extract(response.into_text())?)
    }

    fn generation_failed(mode: Mode, err: GenerationError) -> ProcessError {
        error!(mode = %mode, kind = err.kind(), error = %err, "generation failed");
        ProcessError::Generation(err)
    }
}
