use serde::{Deserialize, Serialize};

/// Normalized text in canonical reading order.
///
/// This is the only form that may be persisted, copied, or compared. It is
/// produced exclusively by the normalizer; the display shaper borrows it but
/// never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalText(String);

impl LogicalText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for LogicalText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display-only text in visual order (reshaped glyphs, bidi-reordered).
///
/// Deliberately offers no conversion back into [`LogicalText`] and no
/// `into_string`: sinks and comparison code take `LogicalText`, so a shaped
/// string cannot end up in a file or on the clipboard by accident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualText(String);

impl VisualText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Borrow the shaped string for rendering.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for VisualText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A finished transcription: raw recognizer output plus the derived logical
/// and visual forms. Retained by the session until cleared or replaced.
#[derive(Debug, Clone)]
pub struct Transcript {
    raw: String,
    language: Option<String>,
    logical: LogicalText,
    visual: VisualText,
    persian: bool,
}

impl Transcript {
    pub fn new(
        raw: impl Into<String>,
        language: Option<String>,
        logical: LogicalText,
        visual: VisualText,
        persian: bool,
    ) -> Self {
        Self {
            raw: raw.into(),
            language,
            logical,
            visual,
            persian,
        }
    }

    /// The untouched recognizer output.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Detected language code, if the recognizer reported one.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Canonical text for copy/save/comparison.
    pub fn logical(&self) -> &LogicalText {
        &self.logical
    }

    /// Shaped text for on-screen rendering only.
    pub fn visual(&self) -> &VisualText {
        &self.visual
    }

    pub fn is_persian(&self) -> bool {
        self.persian
    }
}
