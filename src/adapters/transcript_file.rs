use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::domain::{DomainError, LogicalText};
use crate::ports::TranscriptSink;

/// Transcript sink that writes UTF-8 text files.
///
/// The on-disk content is the logical form: reloading the file and running it
/// through normalization again yields the same text.
pub struct TextFileTranscriptSink {
    path: PathBuf,
}

impl TextFileTranscriptSink {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl TranscriptSink for TextFileTranscriptSink {
    fn persist(&self, text: &LogicalText) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, text.as_str())?;

        info!(path = ?self.path, chars = text.as_str().chars().count(), "Transcript saved");
        Ok(())
    }
}
