use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, info};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::domain::{AudioBuffer, DomainError, ModelSize, WHISPER_SAMPLE_RATE};
use crate::ports::{RecognitionResult, TranscribeOptions, Transcriber};

/// Transcriber implementation using whisper.cpp via whisper-rs.
///
/// Loaded contexts are cached by [`ModelSize`]; reloading a cached size is a
/// no-op. The session's single-flight policy bounds concurrent access, but
/// the cache itself is lock-protected and safe to read from any thread.
pub struct WhisperCppTranscriber {
    contexts: RwLock<HashMap<ModelSize, Arc<WhisperContext>>>,
    threads: u32,
}

impl WhisperCppTranscriber {
    /// Create a transcriber. `threads` = 0 auto-detects (cores - 1).
    pub fn new(threads: u32) -> Self {
        let actual_threads = if threads == 0 {
            std::thread::available_parallelism()
                .map(|p| std::cmp::max(1, p.get() as u32 - 1))
                .unwrap_or(1)
        } else {
            threads
        };

        info!(threads = actual_threads, "WhisperCppTranscriber created");

        Self {
            contexts: RwLock::new(HashMap::new()),
            threads: actual_threads,
        }
    }
}

#[async_trait]
impl Transcriber for WhisperCppTranscriber {
    async fn load_model(&self, size: ModelSize, path: &Path) -> Result<(), DomainError> {
        if self.contexts.read().contains_key(&size) {
            debug!(size = %size, "model already cached");
            return Ok(());
        }

        if !path.exists() {
            return Err(DomainError::ModelNotFound(
                path.to_string_lossy().to_string(),
            ));
        }

        info!(size = %size, path = ?path, "Loading whisper model");

        let path_str = path.to_string_lossy().to_string();
        let ctx = tokio::task::spawn_blocking(move || {
            WhisperContext::new_with_params(&path_str, WhisperContextParameters::default())
                .map_err(|e| DomainError::ModelLoad(format!("Failed to load model: {}", e)))
        })
        .await
        .map_err(|e| DomainError::ModelLoad(format!("Task join error: {}", e)))??;

        self.contexts.write().insert(size, Arc::new(ctx));

        info!(size = %size, "Whisper model loaded");
        Ok(())
    }

    fn is_model_loaded(&self, size: ModelSize) -> bool {
        self.contexts.read().contains_key(&size)
    }

    async fn transcribe(
        &self,
        size: ModelSize,
        audio: &AudioBuffer,
        options: &TranscribeOptions,
    ) -> Result<RecognitionResult, DomainError> {
        let ctx = self
            .contexts
            .read()
            .get(&size)
            .cloned()
            .ok_or_else(|| DomainError::ModelLoad(format!("model '{}' is not loaded", size)))?;

        if audio.sample_rate() != WHISPER_SAMPLE_RATE {
            return Err(DomainError::Transcription(format!(
                "Expected {}Hz audio, got {}Hz",
                WHISPER_SAMPLE_RATE,
                audio.sample_rate()
            )));
        }

        if audio.is_empty() {
            return Ok(RecognitionResult {
                text: String::new(),
                language: None,
                duration_ms: 0,
            });
        }

        let samples = audio.samples().to_vec();
        let threads = if options.threads > 0 {
            options.threads
        } else {
            self.threads
        };
        // whisper.cpp treats "auto" as language auto-detection.
        let language = options.language.clone().unwrap_or_else(|| "auto".to_string());

        debug!(
            size = %size,
            samples = samples.len(),
            duration_secs = audio.duration_secs(),
            threads = threads,
            language = %language,
            "Starting transcription"
        );

        let start = std::time::Instant::now();

        let result = tokio::task::spawn_blocking(move || {
            let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });

            params.set_n_threads(threads as i32);
            params.set_translate(false);
            params.set_print_progress(false);
            params.set_print_realtime(false);
            params.set_print_timestamps(false);
            params.set_language(Some(&language));

            let mut state = ctx.create_state().map_err(|e| {
                DomainError::Transcription(format!("Failed to create whisper state: {}", e))
            })?;

            state.full(params, &samples).map_err(|e| {
                DomainError::Transcription(format!("Transcription failed: {}", e))
            })?;

            let num_segments = state.full_n_segments().map_err(|e| {
                DomainError::Transcription(format!("Failed to get segment count: {}", e))
            })?;

            let mut text = String::new();
            for i in 0..num_segments {
                if let Ok(segment_text) = state.full_get_segment_text(i) {
                    text.push_str(&segment_text);
                }
            }

            let detected_language = state
                .full_lang_id_from_state()
                .ok()
                .and_then(|id| whisper_rs::get_lang_str(id).map(|s| s.to_string()));

            Ok::<(String, Option<String>), DomainError>((
                text.trim().to_string(),
                detected_language,
            ))
        })
        .await
        .map_err(|e| DomainError::Transcription(format!("Task join error: {}", e)))??;

        let duration_ms = start.elapsed().as_millis() as u64;

        info!(
            size = %size,
            text_len = result.0.len(),
            duration_ms = duration_ms,
            detected_language = ?result.1,
            "Transcription complete"
        );

        Ok(RecognitionResult {
            text: result.0,
            language: result.1,
            duration_ms,
        })
    }

    fn unload_all(&self) {
        let mut contexts = self.contexts.write();
        let count = contexts.len();
        contexts.clear();

        if count > 0 {
            info!(count = count, "Whisper models unloaded");
        }
    }
}
