use std::sync::Arc;

use crate::domain::{LogicalText, VisualText};
use crate::ports::{BidiReorderer, GlyphReshaper};
use crate::text::outcome::{run_stage, Stage, StageOutcome};

/// Derives display-only visual text from logical text.
///
/// Reshaping and bidi reordering are capability-backed; either one degrades
/// to the best text computed so far, so shaping never fails and never mutates
/// the logical input. The output is for rendering only.
pub struct DisplayShaper {
    reshaper: Arc<dyn GlyphReshaper>,
    bidi: Arc<dyn BidiReorderer>,
}

impl DisplayShaper {
    pub fn new(reshaper: Arc<dyn GlyphReshaper>, bidi: Arc<dyn BidiReorderer>) -> Self {
        Self { reshaper, bidi }
    }

    /// Shape logical text for on-screen RTL rendering.
    pub fn shape_for_display(&self, logical: &LogicalText) -> VisualText {
        self.shape_with_report(logical).0
    }

    /// Shape and report per-stage outcomes.
    pub fn shape_with_report(&self, logical: &LogicalText) -> (VisualText, Vec<StageOutcome>) {
        let mut outcomes = Vec::new();

        if logical.is_empty() {
            return (VisualText::new(""), outcomes);
        }

        let reshaped = run_stage(
            Stage::GlyphReshaping,
            logical.as_str().to_string(),
            &mut outcomes,
            |s| self.reshaper.reshape(s),
        );

        let visual = run_stage(Stage::BidiReordering, reshaped, &mut outcomes, |s| {
            self.bidi.to_visual_order(s)
        });

        (VisualText::new(visual), outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::ports::IdentityCapability;

    #[test]
    fn test_empty_input_is_noop() {
        let shaper = DisplayShaper::new(Arc::new(IdentityCapability), Arc::new(IdentityCapability));
        let visual = shaper.shape_for_display(&LogicalText::new(""));
        assert_eq!(visual.as_str(), "");
    }

    #[test]
    fn test_identity_capabilities_pass_through() {
        let shaper = DisplayShaper::new(Arc::new(IdentityCapability), Arc::new(IdentityCapability));
        let visual = shaper.shape_for_display(&LogicalText::new("سلام"));
        assert_eq!(visual.as_str(), "سلام");
    }

    #[test]
    fn test_shaping_is_pure_and_does_not_mutate_logical() {
        let shaper = DisplayShaper::new(Arc::new(IdentityCapability), Arc::new(IdentityCapability));
        let logical = LogicalText::new("سلام ی کریم");
        let first = shaper.shape_for_display(&logical);
        let second = shaper.shape_for_display(&logical);
        assert_eq!(first, second);
        assert_eq!(logical.as_str(), "سلام ی کریم");
    }

    #[test]
    fn test_failing_reshaper_falls_back_to_logical() {
        struct Failing;
        impl GlyphReshaper for Failing {
            fn reshape(&self, _: &str) -> Result<String, DomainError> {
                Err(DomainError::capability("reshaper", "broken table"))
            }
        }
        let shaper = DisplayShaper::new(Arc::new(Failing), Arc::new(IdentityCapability));
        let (visual, outcomes) = shaper.shape_with_report(&LogicalText::new("سلام"));
        assert_eq!(visual.as_str(), "سلام");
        assert!(outcomes[0].is_degraded());
    }

    #[test]
    fn test_failing_bidi_keeps_reshaped_text() {
        struct Reversing;
        impl GlyphReshaper for Reversing {
            fn reshape(&self, s: &str) -> Result<String, DomainError> {
                Ok(s.chars().rev().collect())
            }
        }
        struct Failing;
        impl BidiReorderer for Failing {
            fn to_visual_order(&self, _: &str) -> Result<String, DomainError> {
                Err(DomainError::capability("bidi", "no algorithm"))
            }
        }
        let shaper = DisplayShaper::new(Arc::new(Reversing), Arc::new(Failing));
        let (visual, outcomes) = shaper.shape_with_report(&LogicalText::new("abc"));
        assert_eq!(visual.as_str(), "cba");
        assert!(outcomes[1].is_degraded());
    }
}
