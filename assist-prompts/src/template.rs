//! Prompt templates with `{{variable}}` substitution.

use std::collections::BTreeSet;

/// Result alias for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors that can occur while building or rendering templates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// A required variable was not provided at render time.
    #[error("missing required variable: {name}")]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
    },

    /// A variable was declared required but never appears in the template.
    #[error("required variable `{name}` does not appear in the template")]
    UndeclaredVariable {
        /// Name of the declared variable.
        name: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Variable(String),
}

/// A prompt template parsed into literal and variable segments.
///
/// Rendering is a single pass over the parsed segments, so substituted values
/// are never re-scanned for placeholders. An unterminated `{{` is kept as
/// literal text.
///
/// # Examples
///
/// ```
/// use assist_prompts::template::PromptTemplate;
///
/// let template = PromptTemplate::builder("Summarize to {{percentage}}%: {{text}}")
///     .with_required_variable("text")
///     .with_required_variable("percentage")
///     .build()
///     .unwrap();
///
/// let rendered = template
///     .render(&[("text", "வணக்கம்"), ("percentage", "30")])
///     .unwrap();
/// assert_eq!(rendered, "Summarize to 30%: வணக்கம்");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptTemplate {
    source: String,
    segments: Vec<Segment>,
    required: BTreeSet<String>,
}

impl PromptTemplate {
    /// Parses a template with no required variables.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let segments = parse_segments(&source);
        Self {
            source,
            segments,
            required: BTreeSet::new(),
        }
    }

    /// Returns a builder for constructing templates.
    #[must_use]
    pub fn builder(source: impl Into<String>) -> TemplateBuilder {
        TemplateBuilder::new(source)
    }

    /// Renders the template, looking each variable up in `vars`.
    ///
    /// Optional variables without a value render as the empty string.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MissingVariable`] if a required variable has no value.
    pub fn render(&self, vars: &[(&str, &str)]) -> TemplateResult<String> {
        let lookup = |name: &str| {
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| *value)
        };

        if let Some(name) = self.required.iter().find(|name| lookup(name.as_str()).is_none()) {
            return Err(TemplateError::MissingVariable { name: name.clone() });
        }

        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Variable(name) => out.push_str(lookup(name.as_str()).unwrap_or_default()),
            }
        }
        Ok(out)
    }

    /// Returns the names of the variables referenced by the template, in order
    /// of first appearance.
    #[must_use]
    pub fn variables(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for segment in &self.segments {
            if let Segment::Variable(name) = segment {
                if !seen.contains(&name.as_str()) {
                    seen.push(name.as_str());
                }
            }
        }
        seen
    }

    pub(crate) fn require_unchecked(mut self, name: &str) -> Self {
        self.required.insert(name.to_owned());
        self
    }
}

/// Builder for [`PromptTemplate`].
#[derive(Debug)]
pub struct TemplateBuilder {
    source: String,
    required: BTreeSet<String>,
}

impl TemplateBuilder {
    /// Creates a new builder with the supplied template text.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            required: BTreeSet::new(),
        }
    }

    /// Declares a variable that must be provided at render time.
    #[must_use]
    pub fn with_required_variable(mut self, name: impl Into<String>) -> Self {
        self.required.insert(name.into());
        self
    }

    /// Builds the template.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::UndeclaredVariable`] if a required variable is
    /// not referenced anywhere in the template text.
    pub fn build(self) -> TemplateResult<PromptTemplate> {
        let mut template = PromptTemplate::new(self.source);
        let referenced = template.variables();
        if let Some(name) = self
            .required
            .iter()
            .find(|name| !referenced.contains(&name.as_str()))
        {
            return Err(TemplateError::UndeclaredVariable { name: name.clone() });
        }
        template.required = self.required;
        Ok(template)
    }
}

fn parse_segments(source: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut rest = source;

    while let Some(open) = rest.find("{{") {
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("}}") else {
            break;
        };
        let name = after_open[..close].trim();
        if name.is_empty() {
            push_literal(&mut segments, &rest[..open + 2 + close + 2]);
        } else {
            push_literal(&mut segments, &rest[..open]);
            segments.push(Segment::Variable(name.to_owned()));
        }
        rest = &after_open[close + 2..];
    }

    push_literal(&mut segments, rest);
    segments
}

fn push_literal(segments: &mut Vec<Segment>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Segment::Literal(last)) = segments.last_mut() {
        last.push_str(text);
    } else {
        segments.push(Segment::Literal(text.to_owned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_variables_in_place() {
        let template = PromptTemplate::new("Hello {{name}}, you are {{ role }}.");
        let rendered = template
            .render(&[("name", "Kavin"), ("role", "a reviewer")])
            .unwrap();
        assert_eq!(rendered, "Hello Kavin, you are a reviewer.");
    }

    #[test]
    fn optional_variables_render_empty() {
        let template = PromptTemplate::new("[{{missing}}]");
        assert_eq!(template.render(&[]).unwrap(), "[]");
    }

    #[test]
    fn required_variables_error_when_missing() {
        let template = PromptTemplate::builder("Text: {{text}}")
            .with_required_variable("text")
            .build()
            .unwrap();

        let err = template.render(&[]).expect_err("should error");
        assert_eq!(
            err,
            TemplateError::MissingVariable {
                name: "text".into()
            }
        );
    }

    #[test]
    fn build_rejects_unreferenced_required_variable() {
        let err = PromptTemplate::builder("No placeholders here")
            .with_required_variable("text")
            .build()
            .expect_err("undeclared");
        assert!(matches!(err, TemplateError::UndeclaredVariable { .. }));
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let template = PromptTemplate::new("{{a}} / {{b}}");
        let rendered = template.render(&[("a", "{{b}}"), ("b", "x")]).unwrap();
        assert_eq!(rendered, "{{b}} / x");
    }

    #[test]
    fn unterminated_and_empty_braces_stay_literal() {
        let template = PromptTemplate::new("{{}} and {{open");
        assert!(template.variables().is_empty());
        assert_eq!(template.render(&[]).unwrap(), "{{}} and {{open");
    }

    #[test]
    fn lists_variables_once_in_order() {
        let template = PromptTemplate::new("{{x}} {{y}} {{x}}");
        assert_eq!(template.variables(), vec!["x", "y"]);
    }
}
