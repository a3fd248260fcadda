//! Processing modes and the summary length table.

use std::fmt::{self, Display, Formatter};

use crate::error::{Error, Result};

/// Selects which configured model serves a grammar request.
///
/// Both variants share the same prompt and output contract; they differ only
/// in the model identifier sent upstream.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum ModelVariant {
    /// The default model (wire mode `grammar`).
    #[default]
    Standard,
    /// The alternate model used for A/B comparison (wire mode `grammar-a`).
    Alternate,
}

/// Discrete summary length settings.
///
/// Each tier maps to a fixed target percentage of the original passage. The
/// percentage is a hint embedded in the prompt and is never enforced.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub enum LengthTier {
    /// Roughly a tenth of the passage.
    Short,
    /// Roughly a third of the passage.
    #[default]
    Medium,
    /// Most of the passage.
    Long,
}

impl LengthTier {
    /// All tiers in ascending order of output proportion.
    pub const ALL: [Self; 3] = [Self::Short, Self::Medium, Self::Long];

    /// Returns the target percentage for the tier.
    #[must_use]
    pub const fn percentage(self) -> u8 {
        match self {
            Self::Short => 10,
            Self::Medium => 30,
            Self::Long => 70,
        }
    }

    /// Returns the tier's position in the table (`0..=2`).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Short => 0,
            Self::Medium => 1,
            Self::Long => 2,
        }
    }

    /// Looks up a tier by its table index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLengthTier`] for indices past the end of the table.
    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(Error::InvalidLengthTier { index })
    }
}

/// A processing mode with its mode-specific parameter.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Mode {
    /// Correct grammar using the given model variant.
    GrammarCheck(ModelVariant),
    /// Summarize to roughly the tier's percentage of the original length.
    Summarize(LengthTier),
}

impl Mode {
    /// Wire name for [`Mode::GrammarCheck`] with [`ModelVariant::Standard`].
    pub const GRAMMAR: &'static str = "grammar";
    /// Wire name for [`Mode::GrammarCheck`] with [`ModelVariant::Alternate`].
    pub const GRAMMAR_ALTERNATE: &'static str = "grammar-a";
    /// Wire name for [`Mode::Summarize`].
    pub const SUMMARIZE: &'static str = "summarize";

    /// Parses a wire mode string together with the optional length tier index.
    ///
    /// The tier index only matters for summarization and defaults to
    /// [`LengthTier::Medium`]. Grammar modes ignore it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMode`] for unknown mode strings and
    /// [`Error::InvalidLengthTier`] for an out-of-range summary tier.
    pub fn parse(mode: &str, length_tier_index: Option<usize>) -> Result<Self> {
        match mode {
            Self::GRAMMAR => Ok(Self::GrammarCheck(ModelVariant::Standard)),
            Self::GRAMMAR_ALTERNATE => Ok(Self::GrammarCheck(ModelVariant::Alternate)),
            Self::SUMMARIZE => {
                let tier = length_tier_index
                    .map(LengthTier::from_index)
                    .transpose()?
                    .unwrap_or_default();
                Ok(Self::Summarize(tier))
            }
            other => Err(Error::InvalidMode {
                mode: other.to_owned(),
            }),
        }
    }

    /// Returns the wire name of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GrammarCheck(ModelVariant::Standard) => Self::GRAMMAR,
            Self::GrammarCheck(ModelVariant::Alternate) => Self::GRAMMAR_ALTERNATE,
            Self::Summarize(_) => Self::SUMMARIZE,
        }
    }

    /// Returns the model variant serving this mode. Summaries always use the
    /// standard model.
    #[must_use]
    pub const fn model_variant(self) -> ModelVariant {
        match self {
            Self::GrammarCheck(variant) => variant,
            Self::Summarize(_) => ModelVariant::Standard,
        }
    }

    /// Returns the length tier for summarization requests.
    #[must_use]
    pub const fn length_tier(self) -> Option<LengthTier> {
        match self {
            Self::GrammarCheck(_) => None,
            Self::Summarize(tier) => Some(tier),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_map_to_fixed_percentages() {
        let percentages: Vec<u8> = LengthTier::ALL.iter().map(|t| t.percentage()).collect();
        assert_eq!(percentages, vec![10, 30, 70]);
        assert!(LengthTier::Short < LengthTier::Medium);
        assert!(LengthTier::Medium < LengthTier::Long);
    }

    #[test]
    fn tier_index_round_trips() {
        for tier in LengthTier::ALL {
            assert_eq!(LengthTier::from_index(tier.index()).unwrap(), tier);
        }
        let err = LengthTier::from_index(3).expect_err("out of range");
        assert_eq!(err, Error::InvalidLengthTier { index: 3 });
    }

    #[test]
    fn parses_wire_modes() {
        assert_eq!(
            Mode::parse("grammar", None).unwrap(),
            Mode::GrammarCheck(ModelVariant::Standard)
        );
        assert_eq!(
            Mode::parse("grammar-a", Some(0)).unwrap(),
            Mode::GrammarCheck(ModelVariant::Alternate)
        );
        assert_eq!(
            Mode::parse("summarize", Some(2)).unwrap(),
            Mode::Summarize(LengthTier::Long)
        );
    }

    #[test]
    fn summarize_defaults_to_medium() {
        assert_eq!(
            Mode::parse("summarize", None).unwrap(),
            Mode::Summarize(LengthTier::Medium)
        );
    }

    #[test]
    fn grammar_ignores_tier_index() {
        assert_eq!(
            Mode::parse("grammar", Some(9)).unwrap(),
            Mode::GrammarCheck(ModelVariant::Standard)
        );
    }

    #[test]
    fn rejects_unknown_modes() {
        for mode in ["unsupported-mode", "", "Grammar", "summarise"] {
            let err = Mode::parse(mode, None).expect_err("unknown mode");
            assert!(matches!(err, Error::InvalidMode { .. }), "{mode}");
        }
    }

    #[test]
    fn rejects_out_of_range_summary_tier() {
        let err = Mode::parse("summarize", Some(5)).expect_err("bad tier");
        assert_eq!(err, Error::InvalidLengthTier { index: 5 });
    }

    #[test]
    fn wire_names_round_trip() {
        for mode in [
            Mode::GrammarCheck(ModelVariant::Standard),
            Mode::GrammarCheck(ModelVariant::Alternate),
            Mode::Summarize(LengthTier::Medium),
        ] {
            assert_eq!(Mode::parse(mode.as_str(), None).unwrap(), mode);
        }
    }

    #[test]
    fn summaries_use_standard_model() {
        assert_eq!(
            Mode::Summarize(LengthTier::Short).model_variant(),
            ModelVariant::Standard
        );
        assert_eq!(Mode::GrammarCheck(ModelVariant::Alternate).length_tier(), None);
    }
}
