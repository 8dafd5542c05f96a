use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::{AudioBuffer, DomainError, ModelSize};

/// Per-call transcription options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscribeOptions {
    /// Target language (ISO 639-1), None for auto-detection.
    pub language: Option<String>,
    /// Number of threads to use (0 = auto).
    pub threads: u32,
}

impl Default for TranscribeOptions {
    fn default() -> Self {
        Self {
            language: None,
            threads: 0,
        }
    }
}

/// Raw result of a recognition run, before any text normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionResult {
    /// Transcribed text, trimmed.
    pub text: String,
    /// Detected language (ISO 639-1), if the backend reported one.
    pub language: Option<String>,
    /// Inference duration in milliseconds.
    pub duration_ms: u64,
}

/// Port for speech recognition backends.
///
/// Model instances are cached by [`ModelSize`]; loading an already-cached
/// size is a cheap no-op. Loading may be slow and may fail; transcription
/// runs to completion or failure, with no cancellation.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Load (or re-use from cache) the model of the given size from `path`.
    async fn load_model(&self, size: ModelSize, path: &Path) -> Result<(), DomainError>;

    /// Check whether a model of the given size is cached.
    fn is_model_loaded(&self, size: ModelSize) -> bool;

    /// Transcribe 16 kHz mono audio with the cached model of `size`.
    async fn transcribe(
        &self,
        size: ModelSize,
        audio: &AudioBuffer,
        options: &TranscribeOptions,
    ) -> Result<RecognitionResult, DomainError>;

    /// Drop all cached models to free memory.
    fn unload_all(&self);
}
