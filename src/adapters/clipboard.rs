use arboard::Clipboard;
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::domain::{DomainError, LogicalText};
use crate::ports::TranscriptSink;

/// Transcript sink that copies to the system clipboard via `arboard`.
///
/// Note: this replaces the user's clipboard content with the transcript.
pub struct ArboardClipboard {
    clipboard: Mutex<Clipboard>,
}

impl ArboardClipboard {
    /// Create a clipboard sink. Fails on headless systems without a
    /// clipboard service.
    pub fn new() -> Result<Self, DomainError> {
        let clipboard = Clipboard::new().map_err(|e| {
            DomainError::Clipboard(format!("Failed to initialize clipboard: {}", e))
        })?;

        Ok(Self {
            clipboard: Mutex::new(clipboard),
        })
    }
}

impl TranscriptSink for ArboardClipboard {
    fn persist(&self, text: &LogicalText) -> Result<(), DomainError> {
        if text.is_empty() {
            debug!("Empty transcript, skipping clipboard copy");
            return Ok(());
        }

        let mut clipboard = self.clipboard.lock();
        clipboard
            .set_text(text.as_str())
            .map_err(|e| DomainError::Clipboard(format!("Failed to set clipboard text: {}", e)))?;

        info!(chars = text.as_str().chars().count(), "Transcript copied to clipboard");
        Ok(())
    }
}
