use once_cell::sync::OnceCell;
use unicode_normalization::UnicodeNormalization;

use crate::domain::DomainError;
use crate::ports::LinguisticNormalizer;

/// Process-wide character tables for linguistic cleanup, built once on first
/// use. Construction is guarded by `OnceCell`, so concurrent first callers
/// observe a single initialization.
static TABLES: OnceCell<LingualTables> = OnceCell::new();

struct LingualTables {
    /// Code points removed from normalized text: Arabic harakat and
    /// annotation marks (U+064B..U+065F), superscript alef (U+0670) and
    /// tatweel (U+0640).
    stripped: Vec<std::ops::RangeInclusive<char>>,
}

impl LingualTables {
    fn build() -> Self {
        Self {
            stripped: vec![
                '\u{064B}'..='\u{065F}',
                '\u{0670}'..='\u{0670}',
                '\u{0640}'..='\u{0640}',
            ],
        }
    }

    fn is_stripped(&self, c: char) -> bool {
        self.stripped.iter().any(|r| r.contains(&c))
    }
}

/// Linguistic normalizer built on Unicode normalization forms.
///
/// Fixed configuration per the pipeline contract: strips diacritics,
/// collapses redundant whitespace, does not lowercase, does not touch digits
/// (digit conversion is a separate, explicitly gated stage).
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeLinguisticNormalizer;

impl UnicodeLinguisticNormalizer {
    pub fn new() -> Self {
        Self
    }

    fn tables() -> &'static LingualTables {
        TABLES.get_or_init(LingualTables::build)
    }
}

impl LinguisticNormalizer for UnicodeLinguisticNormalizer {
    fn normalize(&self, text: &str) -> Result<String, DomainError> {
        let tables = Self::tables();

        let composed: String = text.nfc().collect();
        let stripped: String = composed.chars().filter(|c| !tables.is_stripped(*c)).collect();

        // Collapse internal whitespace runs; edge trimming is the
        // punctuation stage's job.
        let mut out = String::with_capacity(stripped.len());
        let mut in_whitespace = false;
        for c in stripped.chars() {
            if c.is_whitespace() {
                if !in_whitespace {
                    out.push(' ');
                }
                in_whitespace = true;
            } else {
                out.push(c);
                in_whitespace = false;
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_diacritics() {
        let normalizer = UnicodeLinguisticNormalizer::new();
        // "کَتَب" with fatha marks -> "کتب"
        let out = normalizer.normalize("\u{06A9}\u{064E}\u{062A}\u{064E}\u{0628}").unwrap();
        assert_eq!(out, "\u{06A9}\u{062A}\u{0628}");
    }

    #[test]
    fn test_strips_tatweel() {
        let normalizer = UnicodeLinguisticNormalizer::new();
        let out = normalizer.normalize("سـلام").unwrap();
        assert_eq!(out, "سلام");
    }

    #[test]
    fn test_collapses_whitespace_runs() {
        let normalizer = UnicodeLinguisticNormalizer::new();
        assert_eq!(normalizer.normalize("a \t\n b").unwrap(), "a b");
    }

    #[test]
    fn test_does_not_lowercase_or_touch_digits() {
        let normalizer = UnicodeLinguisticNormalizer::new();
        assert_eq!(normalizer.normalize("Hello 123").unwrap(), "Hello 123");
    }

    #[test]
    fn test_idempotent() {
        let normalizer = UnicodeLinguisticNormalizer::new();
        let once = normalizer.normalize("سَـلام   دنیا").unwrap();
        let twice = normalizer.normalize(&once).unwrap();
        assert_eq!(once, twice);
    }
}
