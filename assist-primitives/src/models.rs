//! Model identifiers and the variant-to-model roster.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::mode::ModelVariant;

const MAX_ID_LEN: usize = 128;

/// Default model for grammar checks and summaries.
pub const DEFAULT_STANDARD_MODEL: &str = "gemini-1.5-flash";
/// Default model for the alternate grammar variant.
pub const DEFAULT_ALTERNATE_MODEL: &str = "gemini-1.5-pro";

/// Identifier of a hosted generation model (e.g. `gemini-1.5-flash`).
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModelId(String);

impl ModelId {
    /// Creates a model identifier after validating its format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidModelId`] if the identifier is empty, too long, or
    /// contains characters that cannot appear in a model path segment.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        validate_identifier(&id)?;
        Ok(Self(id))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ModelId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ModelId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ModelId> for String {
    fn from(value: ModelId) -> Self {
        value.0
    }
}

fn validate_identifier(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(Error::InvalidModelId {
            id: String::new(),
            reason: "identifier cannot be empty".into(),
        });
    }

    if id.len() > MAX_ID_LEN {
        return Err(Error::InvalidModelId {
            id: id.into(),
            reason: format!("identifier length must be <= {MAX_ID_LEN}"),
        });
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        return Err(Error::InvalidModelId {
            id: id.into(),
            reason: "identifier must contain alphanumeric, dash, underscore, or dot".into(),
        });
    }

    Ok(())
}

/// Maps each [`ModelVariant`] to the model that serves it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ModelRoster {
    standard: ModelId,
    alternate: ModelId,
}

impl ModelRoster {
    /// Creates a roster from explicit model identifiers.
    #[must_use]
    pub fn new(standard: ModelId, alternate: ModelId) -> Self {
        Self {
            standard,
            alternate,
        }
    }

    /// Returns the model serving the given variant.
    #[must_use]
    pub fn model_for(&self, variant: ModelVariant) -> &ModelId {
        match variant {
            ModelVariant::Standard => &self.standard,
            ModelVariant::Alternate => &self.alternate,
        }
    }
}

impl Default for ModelRoster {
    fn default() -> Self {
        Self {
            standard: ModelId(DEFAULT_STANDARD_MODEL.to_owned()),
            alternate: ModelId(DEFAULT_ALTERNATE_MODEL.to_owned()),
        }
    }
}
