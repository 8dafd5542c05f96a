use std::sync::Arc;

use crate::domain::LogicalText;
use crate::ports::{DigitConverter, LinguisticNormalizer};
use crate::text::outcome::{run_stage, Stage, StageOutcome};

/// Arabic letterforms mapped to their Persian canonical equivalents.
///
/// U+06C0 (heh with hamza) stays untouched: rewriting it to U+0629 (teh
/// marbuta) changes the reading and is not a Persian normalization.
const VARIANT_MAP: &[(char, char)] = &[
    ('\u{064A}', '\u{06CC}'), // Arabic yeh -> Persian yeh
    ('\u{0643}', '\u{06A9}'), // Arabic kaf -> Persian kaf
];

/// Punctuation that takes exactly one trailing space and no leading space.
const SPACED_MARKS: &[char] = &[',', '\u{060C}', '\u{061B}', '!', '?', '\u{061F}', '.', ':'];

/// Options for a normalization run.
#[derive(Debug, Clone, Copy)]
pub struct NormalizeOptions {
    /// Convert Western digits (0-9) to Persian digits.
    pub convert_digits: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            convert_digits: true,
        }
    }
}

/// Normalizes raw Persian text into stable logical order.
///
/// Stages run in a fixed order; the two capability-backed stages (linguistic
/// cleanup, digit conversion) degrade to their input on failure, so the
/// function is total and idempotent.
pub struct PersianNormalizer {
    linguistic: Arc<dyn LinguisticNormalizer>,
    digits: Arc<dyn DigitConverter>,
}

impl PersianNormalizer {
    pub fn new(linguistic: Arc<dyn LinguisticNormalizer>, digits: Arc<dyn DigitConverter>) -> Self {
        Self { linguistic, digits }
    }

    /// Normalize `text` into logical order.
    pub fn normalize(&self, text: &str, options: NormalizeOptions) -> LogicalText {
        self.normalize_with_report(text, options).0
    }

    /// Normalize and report the outcome of every executed stage.
    pub fn normalize_with_report(
        &self,
        text: &str,
        options: NormalizeOptions,
    ) -> (LogicalText, Vec<StageOutcome>) {
        let mut outcomes = Vec::new();

        if text.is_empty() {
            return (LogicalText::new(text), outcomes);
        }

        let unified = unify_variants(text);
        outcomes.push(StageOutcome::Applied(Stage::VariantUnification));

        let cleaned = run_stage(Stage::Linguistic, unified, &mut outcomes, |s| {
            self.linguistic.normalize(s)
        });

        let spaced = fix_punctuation_spacing(&cleaned);
        outcomes.push(StageOutcome::Applied(Stage::PunctuationSpacing));

        let final_text = if options.convert_digits {
            run_stage(Stage::DigitConversion, spaced, &mut outcomes, |s| {
                self.digits.western_to_persian(s)
            })
        } else {
            spaced
        };

        (LogicalText::new(final_text), outcomes)
    }
}

/// Replace Arabic-style code points with their Persian canonical forms.
fn unify_variants(text: &str) -> String {
    text.chars()
        .map(|c| {
            VARIANT_MAP
                .iter()
                .find(|(from, _)| *from == c)
                .map(|(_, to)| *to)
                .unwrap_or(c)
        })
        .collect()
}

/// Enforce "no space before, one space after" around punctuation marks,
/// then collapse remaining whitespace runs and trim.
fn fix_punctuation_spacing(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if SPACED_MARKS.contains(&c) {
            while out.ends_with(|ch: char| ch.is_whitespace()) {
                out.pop();
            }
            out.push(c);
            out.push(' ');
            while chars.peek().is_some_and(|ch| ch.is_whitespace()) {
                chars.next();
            }
        } else {
            out.push(c);
        }
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
