//! Mode-specific instructions sent to the generation service.

use assist_primitives::{LengthTier, Mode};
use tracing::debug;

use crate::template::{PromptTemplate, TemplateError, TemplateResult};

/// Default grammar-correction instruction. Requires `text`.
pub const GRAMMAR_INSTRUCTION: &str = "Correct the grammar of the following Tamil sentence \
without altering the original meaning or introducing any offensive, harmful, or irrelevant \
content. Only focus on grammar corrections: {{text}}";

/// Default summarization instruction. Requires `text` and `percentage`.
pub const SUMMARY_INSTRUCTION: &str = "Summarize the following Tamil passage in clear and \
concise Tamil, with a length of approximately {{percentage}}% of the original passage. Ensure \
the summary captures the main ideas accurately and excludes any offensive, harmful, or \
irrelevant content. The text is: {{text}}";

const TEXT_VAR: &str = "text";
const PERCENTAGE_VAR: &str = "percentage";

/// The pair of templates used to instruct the model for each mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstructionSet {
    grammar: PromptTemplate,
    summary: PromptTemplate,
}

impl InstructionSet {
    /// Creates an instruction set from custom templates.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::UndeclaredVariable`] if the grammar template
    /// does not reference `text`, or the summary template does not reference
    /// both `text` and `percentage`.
    pub fn new(grammar: impl Into<String>, summary: impl Into<String>) -> TemplateResult<Self> {
        let grammar = PromptTemplate::builder(grammar)
            .with_required_variable(TEXT_VAR)
            .build()?;
        let summary = PromptTemplate::builder(summary)
            .with_required_variable(TEXT_VAR)
            .with_required_variable(PERCENTAGE_VAR)
            .build()?;
        Ok(Self { grammar, summary })
    }

    /// Renders the instruction for `mode` around the user's `text`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if rendering fails; the required variables are
    /// always supplied, so this only happens for malformed custom templates.
    pub fn render(&self, mode: Mode, text: &str) -> TemplateResult<String> {
        let prompt = match mode {
            Mode::GrammarCheck(_) => self.grammar.render(&[(TEXT_VAR, text)])?,
            Mode::Summarize(tier) => self.render_summary(tier, text)?,
        };
        debug!(mode = %mode, prompt_chars = prompt.chars().count(), "rendered instruction");
        Ok(prompt)
    }

    fn render_summary(&self, tier: LengthTier, text: &str) -> Result<String, TemplateError> {
        let percentage = tier.percentage().to_string();
        self.summary
            .render(&[(TEXT_VAR, text), (PERCENTAGE_VAR, percentage.as_str())])
    }
}

impl Default for InstructionSet {
    fn default() -> Self {
        Self {
            grammar: PromptTemplate::new(GRAMMAR_INSTRUCTION).require_unchecked(TEXT_VAR),
            summary: PromptTemplate::new(SUMMARY_INSTRUCTION)
                .require_unchecked(TEXT_VAR)
                .require_unchecked(PERCENTAGE_VAR),
        }
    }
}

#[cfg(test)]
mod tests {
    use assist_primitives::ModelVariant;

    use super::*;

    const SENTENCE: &str = "அவள் படிக்கிறான்";

    #[test]
    fn default_templates_pass_validation() {
        let validated = InstructionSet::new(GRAMMAR_INSTRUCTION, SUMMARY_INSTRUCTION).unwrap();
        assert_eq!(validated, InstructionSet::default());
    }

    #[test]
    fn grammar_instruction_wraps_text() {
        let prompt = InstructionSet::default()
            .render(Mode::GrammarCheck(ModelVariant::Standard), SENTENCE)
            .unwrap();
        assert!(prompt.starts_with("Correct the grammar of the following Tamil sentence"));
        assert!(prompt.ends_with(&format!("Only focus on grammar corrections: {SENTENCE}")));
        assert!(!prompt.contains('%'));
        assert!(!prompt.contains("{{"));
    }

    #[test]
    fn grammar_variants_share_instruction() {
        let set = InstructionSet::default();
        let standard = set
            .render(Mode::GrammarCheck(ModelVariant::Standard), SENTENCE)
            .unwrap();
        let alternate = set
            .render(Mode::GrammarCheck(ModelVariant::Alternate), SENTENCE)
            .unwrap();
        assert_eq!(standard, alternate);
    }

    #[test]
    fn summary_embeds_tier_percentage() {
        let set = InstructionSet::default();
        for (tier, expected) in [
            (LengthTier::Short, "approximately 10% of"),
            (LengthTier::Medium, "approximately 30% of"),
            (LengthTier::Long, "approximately 70% of"),
        ] {
            let prompt = set.render(Mode::Summarize(tier), SENTENCE).unwrap();
            assert!(prompt.contains(expected), "{prompt}");
            assert!(prompt.ends_with(&format!("The text is: {SENTENCE}")));
        }
    }

    #[test]
    fn tiers_change_only_the_percentage() {
        let set = InstructionSet::default();
        let short = set
            .render(Mode::Summarize(LengthTier::Short), SENTENCE)
            .unwrap();
        let long = set
            .render(Mode::Summarize(LengthTier::Long), SENTENCE)
            .unwrap();
        assert_eq!(short.replacen("10%", "70%", 1), long);
    }

    #[test]
    fn custom_templates_must_reference_variables() {
        let err = InstructionSet::new("Fix: {{text}}", "Summarize {{text}}")
            .expect_err("summary lacks percentage");
        assert_eq!(
            err,
            TemplateError::UndeclaredVariable {
                name: "percentage".into()
            }
        );
    }

    #[test]
    fn custom_templates_render() {
        let set = InstructionSet::new("Fix: {{text}}", "{{percentage}}|{{text}}").unwrap();
        assert_eq!(
            set.render(Mode::Summarize(LengthTier::Medium), "அ").unwrap(),
            "30|அ"
        );
    }
}
