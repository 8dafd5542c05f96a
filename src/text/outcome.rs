use tracing::warn;

use crate::domain::DomainError;

/// A stage of the normalization/shaping pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    VariantUnification,
    Linguistic,
    PunctuationSpacing,
    DigitConversion,
    GlyphReshaping,
    BidiReordering,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::VariantUnification => "variant_unification",
            Stage::Linguistic => "linguistic",
            Stage::PunctuationSpacing => "punctuation_spacing",
            Stage::DigitConversion => "digit_conversion",
            Stage::GlyphReshaping => "glyph_reshaping",
            Stage::BidiReordering => "bidi_reordering",
        };
        f.write_str(name)
    }
}

/// Per-stage outcome. Degradation never aborts the pipeline, but it stays
/// visible here for logging and tests instead of being swallowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    Applied(Stage),
    Degraded { stage: Stage, reason: String },
}

impl StageOutcome {
    pub fn stage(&self) -> Stage {
        match self {
            StageOutcome::Applied(stage) => *stage,
            StageOutcome::Degraded { stage, .. } => *stage,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, StageOutcome::Degraded { .. })
    }
}

/// Run one fallible stage: on success the stage output replaces the text,
/// on failure the previous text is kept and the failure is recorded.
pub(crate) fn run_stage<F>(
    stage: Stage,
    input: String,
    outcomes: &mut Vec<StageOutcome>,
    f: F,
) -> String
where
    F: FnOnce(&str) -> Result<String, DomainError>,
{
    match f(&input) {
        Ok(output) => {
            outcomes.push(StageOutcome::Applied(stage));
            output
        }
        Err(err) => {
            warn!(stage = %stage, error = %err, "text stage degraded, keeping previous output");
            outcomes.push(StageOutcome::Degraded {
                stage,
                reason: err.to_string(),
            });
            input
        }
    }
}
