//! Google Gemini `generateContent` client.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use hyper::body::to_bytes;
use hyper::header::{CONTENT_TYPE, RETRY_AFTER};
use hyper::{Body, Request, StatusCode, Uri};
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, warn};

use assist_primitives::ModelId;
use assist_prompts::ResponseSchema;

use crate::http_client::{HttpsClient, https_client};
use crate::traits::{
    AdapterError, AdapterResult, GenerationClient, GenerationRequest, GenerationResponse,
};

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";

const API_KEY_HEADER: &str = "x-goog-api-key";
const JSON_MIME_TYPE: &str = "application/json";
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Finish reasons for which the service withholds the candidate text.
const BLOCKING_FINISH_REASONS: [&str; 6] = [
    "SAFETY",
    "RECITATION",
    "LANGUAGE",
    "BLOCKLIST",
    "PROHIBITED_CONTENT",
    "SPII",
];

/// Configuration for the Gemini client.
#[derive(Clone)]
pub struct GeminiConfig {
    api_key: Option<String>,
    base_url: String,
    timeout: Option<Duration>,
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GeminiConfig {
    /// Creates a configuration for the public endpoint with no key and no timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
        }
    }

    /// Overrides the base URL used for API calls.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Configuration`] if the supplied URL is invalid.
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> AdapterResult<Self> {
        self.base_url = sanitize_base_url(base_url.as_ref())?;
        Ok(self)
    }

    /// Bounds each request by `timeout`. Without one the client waits for the
    /// transport.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Supplies an explicit API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Returns the configured base URL (always ends with `/`).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the configured request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Gemini client that calls the REST API over HTTPS.
pub struct GeminiClient {
    client: HttpsClient,
    base_url: String,
    api_key: String,
    timeout: Option<Duration>,
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Constructs a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Configuration`] if the API key is missing or blank.
    pub fn new(config: GeminiConfig) -> AdapterResult<Self> {
        let api_key = config
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AdapterError::configuration("Gemini client requires an API key"))?;

        let allow_plain_http = config.base_url.starts_with("http://");
        Ok(Self {
            client: https_client(allow_plain_http),
            base_url: config.base_url,
            api_key,
            timeout: config.timeout,
        })
    }

    fn endpoint(&self, model: &ModelId) -> AdapterResult<Uri> {
        format!("{}v1beta/models/{model}:generateContent", self.base_url)
            .parse::<Uri>()
            .map_err(|err| AdapterError::configuration(format!("invalid Gemini endpoint: {err}")))
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    fn provider(&self) -> &'static str {
        "gemini"
    }

    async fn generate(&self, request: GenerationRequest) -> AdapterResult<GenerationResponse> {
        let payload = build_payload(&request);
        let body = serde_json::to_vec(&payload).map_err(|err| {
            AdapterError::invalid_request(format!("failed to encode Gemini request: {err}"))
        })?;

        let req = Request::post(self.endpoint(request.model())?)
            .header(CONTENT_TYPE, JSON_MIME_TYPE)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .body(Body::from(body))
            .map_err(|err| {
                AdapterError::invalid_request(format!("failed to build Gemini request: {err}"))
            })?;

        debug!(
            model = %request.model(),
            structured = request.config().response_schema().is_some(),
            "sending Gemini generateContent request"
        );

        let pending = self.client.request(req);
        let response = match self.timeout {
            Some(limit) => timeout(limit, pending)
                .await
                .map_err(|_| AdapterError::transport("Gemini request timed out"))?,
            None => pending.await,
        }
        .map_err(|err| AdapterError::transport(format!("Gemini request failed: {err}")))?;

        let status = response.status();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok())
            .map(Duration::from_secs);

        let bytes = to_bytes(response.into_body()).await.map_err(|err| {
            AdapterError::transport(format!("failed to read Gemini response: {err}"))
        })?;

        debug!(status = status.as_u16(), bytes = bytes.len(), "Gemini response received");

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(AdapterError::RateLimited { retry_after });
        }

        if !status.is_success() {
            let reason: String = String::from_utf8_lossy(&bytes)
                .chars()
                .take(MAX_ERROR_BODY_CHARS)
                .collect();
            return Err(AdapterError::response(format!(
                "Gemini returned {status}: {reason}"
            )));
        }

        let decoded: GenerateContentResponse = serde_json::from_slice(&bytes).map_err(|err| {
            AdapterError::response(format!("failed to decode Gemini response: {err}"))
        })?;

        candidate_text(decoded).map(GenerationResponse::new)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<WireGenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    response_mime_type: &'static str,
    response_schema: ResponseSchema,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

fn build_payload(request: &GenerationRequest) -> GenerateContentRequest {
    let generation_config =
        request
            .config()
            .response_schema()
            .map(|schema| WireGenerationConfig {
                response_mime_type: JSON_MIME_TYPE,
                response_schema: schema.clone(),
            });

    GenerateContentRequest {
        contents: vec![Content {
            role: "user",
            parts: vec![Part {
                text: request.prompt().to_owned(),
            }],
        }],
        generation_config,
    }
}

/// Extracts the text of the first candidate, treating safety stops and prompt
/// blocks as errors. A response with neither candidates nor feedback yields
/// empty text.
fn candidate_text(response: GenerateContentResponse) -> AdapterResult<String> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
            warn!(reason = reason.as_str(), "Gemini blocked the prompt");
            return Err(AdapterError::blocked(format!("prompt blocked: {reason}")));
        }
        return Ok(String::new());
    };

    if let Some(reason) = candidate
        .finish_reason
        .as_deref()
        .filter(|reason| BLOCKING_FINISH_REASONS.contains(reason))
    {
        warn!(reason, "Gemini stopped the candidate");
        return Err(AdapterError::blocked(format!("candidate finished with {reason}")));
    }

    Ok(candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default())
}

fn sanitize_base_url(input: &str) -> AdapterResult<String> {
    let mut base = input.trim().to_owned();
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(AdapterError::configuration(
            "Gemini base URL must start with http:// or https://",
        ));
    }
    if !base.ends_with('/') {
        base.push('/');
    }
    base.parse::<Uri>()
        .map_err(|err| AdapterError::configuration(format!("invalid Gemini base URL: {err}")))?;
    Ok(base)
}
