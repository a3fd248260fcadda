//! Output contracts: the response shape expected for each mode.

use std::collections::BTreeMap;

use assist_primitives::Mode;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Field holding the corrected sentence in structured grammar responses.
pub const CORRECTED_TEXT_FIELD: &str = "correctedText";

/// Result alias for contract operations.
pub type ContractResult<T> = Result<T, ContractError>;

/// Errors raised while unwrapping a response against its contract.
#[derive(Debug, Error)]
pub enum ContractError {
    /// The response body was not valid JSON.
    #[error("structured response is not valid JSON: {source}")]
    MalformedJson {
        /// Source [`serde_json::Error`].
        #[from]
        source: serde_json::Error,
    },

    /// The response was valid JSON but not an object.
    #[error("structured response is not a JSON object")]
    NotAnObject,

    /// The expected field was absent or null.
    #[error("structured response is missing `{field}`")]
    MissingField {
        /// Name of the missing field.
        field: String,
    },

    /// The expected field was present with a non-string value.
    #[error("structured response field `{field}` is not a string")]
    WrongType {
        /// Name of the offending field.
        field: String,
    },
}

/// Primitive types accepted in a response schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    /// A JSON object with named properties.
    Object,
    /// A JSON string.
    String,
}

/// Declared shape of a structured response, in the OpenAPI subset understood
/// by the generation service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResponseSchema {
    #[serde(rename = "type")]
    kind: SchemaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    nullable: bool,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    properties: BTreeMap<String, ResponseSchema>,
}

impl ResponseSchema {
    /// Creates an object schema with no properties.
    #[must_use]
    pub fn object() -> Self {
        Self::of(SchemaType::Object)
    }

    /// Creates a string schema.
    #[must_use]
    pub fn string() -> Self {
        Self::of(SchemaType::String)
    }

    fn of(kind: SchemaType) -> Self {
        Self {
            kind,
            description: None,
            nullable: false,
            properties: BTreeMap::new(),
        }
    }

    /// Attaches a description for the model.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the value as nullable.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Adds a named property to an object schema.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, schema: ResponseSchema) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }
}

/// Expected response shape for a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputContract {
    /// JSON object matching `schema`; the result is the string at `field`.
    Structured {
        /// Field carrying the result.
        field: String,
        /// Schema declared to the generation service.
        schema: ResponseSchema,
    },
    /// Plain text returned unmodified.
    Freeform,
}

impl OutputContract {
    /// Contract for grammar correction: an object with a nullable
    /// `correctedText` string.
    #[must_use]
    pub fn grammar() -> Self {
        let schema = ResponseSchema::object().with_property(
            CORRECTED_TEXT_FIELD,
            ResponseSchema::string()
                .with_description("The grammatically corrected Tamil sentence.")
                .nullable(),
        );
        Self::Structured {
            field: CORRECTED_TEXT_FIELD.to_owned(),
            schema,
        }
    }

    /// Selects the contract for `mode`.
    #[must_use]
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::GrammarCheck(_) => Self::grammar(),
            Mode::Summarize(_) => Self::Freeform,
        }
    }

    /// Returns the schema to declare upstream, if any.
    #[must_use]
    pub fn schema(&self) -> Option<&ResponseSchema> {
        match self {
            Self::Structured { schema, .. } => Some(schema),
            Self::Freeform => None,
        }
    }

    /// Unwraps the raw response text into the result string.
    ///
    /// Freeform responses are returned as-is, without trimming.
    ///
    /// # Errors
    ///
    /// For structured contracts, returns [`ContractError`] when the text is not
    /// a JSON object or the expected field is missing, null, or not a string.
    pub fn extract(&self, raw: String) -> ContractResult<String> {
        let field = match self {
            Self::Freeform => return Ok(raw),
            Self::Structured { field, .. } => field,
        };

        let value: Value = serde_json::from_str(&raw)?;
        let Value::Object(mut object) = value else {
            return Err(ContractError::NotAnObject);
        };

        match object.remove(field) {
            Some(Value::String(text)) => Ok(text),
            None | Some(Value::Null) => {
                debug!(field = field.as_str(), "structured response missing result field");
                Err(ContractError::MissingField {
                    field: field.clone(),
                })
            }
            Some(_) => Err(ContractError::WrongType {
                field: field.clone(),
            }),
        }
    }
}
