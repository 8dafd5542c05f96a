//! The Persian text core: script detection, logical-order normalization, and
//! display-only visual shaping.
//!
//! Everything here is synchronous, thread-agnostic, and total: capability
//! failures degrade to the previous stage's output instead of propagating.

pub mod detect;
pub mod normalize;
pub mod outcome;
pub mod shape;

use std::sync::Arc;

use crate::domain::config::TextConfig;
use crate::domain::{LogicalText, Transcript, VisualText};
use crate::ports::{BidiReorderer, DigitConverter, GlyphReshaper, LinguisticNormalizer};

pub use detect::{is_persian, language_hints_persian};
pub use normalize::{NormalizeOptions, PersianNormalizer};
pub use outcome::{Stage, StageOutcome};
pub use shape::DisplayShaper;

/// Normalizer plus shaper with a fixed capability selection.
///
/// Built once at startup and shared; holds no mutable state.
pub struct TextPipeline {
    normalizer: PersianNormalizer,
    shaper: DisplayShaper,
    options: NormalizeOptions,
}

impl TextPipeline {
    /// Wire the pipeline with the standard adapters.
    pub fn standard(config: &TextConfig) -> Self {
        Self::with_capabilities(
            Arc::new(crate::adapters::UnicodeLinguisticNormalizer::new()),
            Arc::new(crate::adapters::PersianDigitConverter),
            Arc::new(crate::adapters::ArReshaper::new()),
            Arc::new(crate::adapters::UnicodeBidiReorderer),
            NormalizeOptions {
                convert_digits: config.convert_digits,
            },
        )
    }

    /// Wire the pipeline with explicit capabilities (tests, degraded setups).
    pub fn with_capabilities(
        linguistic: Arc<dyn LinguisticNormalizer>,
        digits: Arc<dyn DigitConverter>,
        reshaper: Arc<dyn GlyphReshaper>,
        bidi: Arc<dyn BidiReorderer>,
        options: NormalizeOptions,
    ) -> Self {
        Self {
            normalizer: PersianNormalizer::new(linguistic, digits),
            shaper: DisplayShaper::new(reshaper, bidi),
            options,
        }
    }

    pub fn normalizer(&self) -> &PersianNormalizer {
        &self.normalizer
    }

    pub fn shaper(&self) -> &DisplayShaper {
        &self.shaper
    }

    /// Turn a recognition result into a [`Transcript`].
    ///
    /// Persian text (by script scan or language tag) is normalized and shaped;
    /// anything else passes through trimmed, with visual == logical.
    pub fn prepare(&self, raw: &str, language: Option<&str>) -> Transcript {
        let trimmed = raw.trim();
        let persian = is_persian(trimmed) || language_hints_persian(language);

        let (logical, visual) = if persian {
            let logical = self.normalizer.normalize(trimmed, self.options);
            let visual = self.shaper.shape_for_display(&logical);
            (logical, visual)
        } else {
            (LogicalText::new(trimmed), VisualText::new(trimmed))
        };

        Transcript::new(raw, language.map(str::to_string), logical, visual, persian)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::IdentityCapability;

    fn identity_pipeline() -> TextPipeline {
        TextPipeline::with_capabilities(
            Arc::new(IdentityCapability),
            Arc::new(IdentityCapability),
            Arc::new(IdentityCapability),
            Arc::new(IdentityCapability),
            NormalizeOptions::default(),
        )
    }

    #[test]
    fn test_prepare_persian_by_script() {
        let transcript = identity_pipeline().prepare("سلام ي كريم", None);
        assert!(transcript.is_persian());
        assert_eq!(transcript.logical().as_str(), "سلام ی کریم");
    }

    #[test]
    fn test_prepare_persian_by_language_tag() {
        // No Arabic-block characters, but the recognizer says Persian.
        let transcript = identity_pipeline().prepare("salam", Some("fa"));
        assert!(transcript.is_persian());
    }

    #[test]
    fn test_prepare_non_persian_passes_through() {
        let transcript = identity_pipeline().prepare("  hello world  ", Some("en"));
        assert!(!transcript.is_persian());
        assert_eq!(transcript.logical().as_str(), "hello world");
        assert_eq!(transcript.visual().as_str(), "hello world");
    }

    #[test]
    fn test_prepare_keeps_raw() {
        let transcript = identity_pipeline().prepare("  hi  ", None);
        assert_eq!(transcript.raw(), "  hi  ");
    }

    #[test]
    fn test_standard_pipeline_converts_digits_and_unifies_variants() {
        let pipeline = TextPipeline::standard(&TextConfig::default());
        let transcript = pipeline.prepare("سلام ي كريم 123", Some("fa"));
        assert!(transcript.is_persian());
        assert_eq!(transcript.logical().as_str(), "سلام ی کریم ۱۲۳");
        assert!(!transcript.visual().is_empty());
    }

    #[test]
    fn test_standard_pipeline_converts_mixed_digit_runs() {
        let pipeline = TextPipeline::standard(&TextConfig::default());
        let transcript = pipeline.prepare("۱۲3", Some("fa"));
        assert_eq!(transcript.logical().as_str(), "۱۲۳");
    }

    #[test]
    fn test_standard_pipeline_respects_digit_opt_out() {
        let config = TextConfig {
            convert_digits: false,
        };
        let pipeline = TextPipeline::standard(&config);
        let transcript = pipeline.prepare("سلام 123", Some("fa"));
        assert_eq!(transcript.logical().as_str(), "سلام 123");
    }
}
