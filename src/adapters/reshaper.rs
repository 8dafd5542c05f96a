use ar_reshaper::ArabicReshaper;

use crate::domain::DomainError;
use crate::ports::GlyphReshaper;

/// Glyph reshaper backed by the `ar-reshaper` crate.
///
/// Rewrites Arabic-block letters into their contextual presentation forms
/// (initial/medial/final/isolated) so connected script renders with correct
/// joining even in renderers that do not shape text themselves.
pub struct ArReshaper {
    inner: ArabicReshaper,
}

impl ArReshaper {
    pub fn new() -> Self {
        Self {
            inner: ArabicReshaper::default(),
        }
    }
}

impl Default for ArReshaper {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphReshaper for ArReshaper {
    fn reshape(&self, text: &str) -> Result<String, DomainError> {
        Ok(self.inner.reshape(text))
    }
}
