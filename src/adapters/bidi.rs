use unicode_bidi::BidiInfo;

use crate::domain::DomainError;
use crate::ports::BidiReorderer;

/// Bidi reordering backed by the `unicode-bidi` crate (UAX #9).
///
/// Produces the left-to-right storage order that renders visually
/// right-to-left, paragraph by paragraph. The base direction is taken from
/// the text itself (no forced level).
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeBidiReorderer;

impl BidiReorderer for UnicodeBidiReorderer {
    fn to_visual_order(&self, text: &str) -> Result<String, DomainError> {
        let bidi = BidiInfo::new(text, None);
        let mut out = String::with_capacity(text.len());
        for paragraph in &bidi.paragraphs {
            out.push_str(&bidi.reorder_line(paragraph, paragraph.range.clone()));
        }
        Ok(out)
    }
}
