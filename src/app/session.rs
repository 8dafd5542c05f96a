use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::domain::{DomainError, ModelSize, Transcript, WHISPER_SAMPLE_RATE};
use crate::ports::{AudioReader, ModelStore, TranscribeOptions, Transcriber, TranscriptSink};
use crate::text::TextPipeline;

/// Lifecycle events of one transcription run, delivered in order.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Model resolution started (may include a download on first use).
    ModelLoading { size: ModelSize },
    /// Model is resolved and loaded into the recognizer.
    ModelReady { size: ModelSize },
    /// Audio is decoded and inference is running.
    TranscriptionStarted,
    /// The run finished; the transcript is also retained by the session.
    TranscriptReady(Transcript),
    /// The run failed. The session is idle again.
    Failed { message: String },
}

/// Orchestrates a transcription run: model resolution, audio decoding,
/// recognition, and text preparation.
///
/// At most one run is active at a time. [`TranscriptionSession::start`] on a
/// busy session is a no-op returning `false`; there is no queueing and no
/// cancellation. Events are posted to an unbounded channel, so observers see
/// them in the order the run produced them.
pub struct TranscriptionSession {
    transcriber: Arc<dyn Transcriber>,
    model_store: Arc<dyn ModelStore>,
    readers: Vec<Arc<dyn AudioReader>>,
    pipeline: Arc<TextPipeline>,
    model_size: ModelSize,
    options: TranscribeOptions,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    busy: AtomicBool,
    current: RwLock<Option<Transcript>>,
}

impl TranscriptionSession {
    /// Create a session and the receiving end of its event channel.
    pub fn new(
        transcriber: Arc<dyn Transcriber>,
        model_store: Arc<dyn ModelStore>,
        readers: Vec<Arc<dyn AudioReader>>,
        pipeline: Arc<TextPipeline>,
        model_size: ModelSize,
        options: TranscribeOptions,
    ) -> (Arc<Self>, mpsc::UnboundedReceiver<SessionEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let session = Arc::new(Self {
            transcriber,
            model_store,
            readers,
            pipeline,
            model_size,
            options,
            events_tx,
            busy: AtomicBool::new(false),
            current: RwLock::new(None),
        });

        (session, events_rx)
    }

    /// Start transcribing `path` in the background.
    ///
    /// Returns `false` without side effects when a run is already active.
    pub fn start(self: &Arc<Self>, path: PathBuf) -> bool {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!(path = ?path, "Transcription already in progress, ignoring request");
            return false;
        }

        info!(path = ?path, size = %self.model_size, "Transcription started");

        let session = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = session.run(&path).await {
                error!(error = %e, "Transcription run failed");
                session.emit(SessionEvent::Failed {
                    message: e.to_string(),
                });
            }
            session.busy.store(false, Ordering::Release);
        });

        true
    }

    /// Whether a run is currently active.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// The most recent transcript, until cleared or replaced.
    pub fn transcript(&self) -> Option<Transcript> {
        self.current.read().clone()
    }

    /// Drop the retained transcript.
    pub fn clear(&self) {
        *self.current.write() = None;
        debug!("Transcript cleared");
    }

    /// Drop the recognizer's cached models to free memory.
    ///
    /// The next run reloads from disk; nothing else about the session
    /// changes.
    pub fn release_models(&self) {
        self.transcriber.unload_all();
        debug!("Recognizer models released");
    }

    /// Export the retained transcript's logical text through a sink.
    pub fn save(&self, sink: &dyn TranscriptSink) -> Result<(), DomainError> {
        let current = self.current.read();
        let transcript = current
            .as_ref()
            .ok_or_else(|| DomainError::Transcription("no transcript to export".to_string()))?;
        sink.persist(transcript.logical())
    }

    fn emit(&self, event: SessionEvent) {
        // Receiver may be gone during shutdown; the run still completes.
        let _ = self.events_tx.send(event);
    }

    async fn run(&self, path: &Path) -> Result<(), DomainError> {
        let size = self.model_size;

        self.emit(SessionEvent::ModelLoading { size });

        let model_path = self.model_store.ensure(size, None).await?;
        self.transcriber.load_model(size, &model_path).await?;

        self.emit(SessionEvent::ModelReady { size });
        self.emit(SessionEvent::TranscriptionStarted);

        let audio = self.decode_audio(path).await?;
        let audio = audio.resampled(WHISPER_SAMPLE_RATE);

        let result = self
            .transcriber
            .transcribe(size, &audio, &self.options)
            .await?;

        let language = result
            .language
            .as_deref()
            .or(self.options.language.as_deref());
        let transcript = self.pipeline.prepare(&result.text, language);

        info!(
            persian = transcript.is_persian(),
            language = ?transcript.language(),
            chars = transcript.logical().as_str().chars().count(),
            duration_ms = result.duration_ms,
            "Transcript ready"
        );

        *self.current.write() = Some(transcript.clone());
        self.emit(SessionEvent::TranscriptReady(transcript));

        Ok(())
    }

    /// Try each reader in order; report a combined error when all fail.
    async fn decode_audio(&self, path: &Path) -> Result<crate::domain::AudioBuffer, DomainError> {
        let readers = self.readers.clone();
        let path = path.to_path_buf();

        tokio::task::spawn_blocking(move || {
            let mut failures: Vec<String> = Vec::new();

            for reader in &readers {
                match reader.read(&path) {
                    Ok(audio) => {
                        debug!(
                            reader = reader.name(),
                            samples = audio.len(),
                            sample_rate = audio.sample_rate(),
                            "Audio decoded"
                        );
                        return Ok(audio);
                    }
                    Err(e) => {
                        debug!(reader = reader.name(), error = %e, "Reader failed, trying next");
                        failures.push(format!("{}: {}", reader.name(), e));
                    }
                }
            }

            Err(DomainError::AudioDecode(format!(
                "all decoders failed for {}: {}",
                path.display(),
                failures.join("; ")
            )))
        })
        .await
        .map_err(|e| DomainError::AudioDecode(format!("Task join error: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    use crate::domain::{
        AudioBuffer, DownloadProgress, InstalledModel, LogicalText, ModelCatalog,
    };
    use crate::ports::{IdentityCapability, RecognitionResult};
    use crate::text::NormalizeOptions;

    struct FakeModelStore {
        catalog: ModelCatalog,
        path: PathBuf,
    }

    impl FakeModelStore {
        fn new() -> Self {
            Self {
                catalog: ModelCatalog {
                    version: 1,
                    models: Vec::new(),
                },
                path: std::env::temp_dir().join("parscribe_fake_model.bin"),
            }
        }
    }

    #[async_trait]
    impl ModelStore for FakeModelStore {
        fn catalog(&self) -> &ModelCatalog {
            &self.catalog
        }

        fn list_installed(&self) -> Result<Vec<InstalledModel>, DomainError> {
            Ok(Vec::new())
        }

        fn is_installed(&self, _size: ModelSize) -> bool {
            true
        }

        fn model_path(&self, _size: ModelSize) -> Option<PathBuf> {
            Some(self.path.clone())
        }

        async fn ensure(
            &self,
            _size: ModelSize,
            _progress: Option<Box<dyn Fn(DownloadProgress) + Send + Sync>>,
        ) -> Result<PathBuf, DomainError> {
            Ok(self.path.clone())
        }

        fn verify(&self, _size: ModelSize) -> Result<bool, DomainError> {
            Ok(true)
        }

        fn delete(&self, _size: ModelSize) -> Result<(), DomainError> {
            Ok(())
        }

        fn models_dir(&self) -> PathBuf {
            std::env::temp_dir()
        }
    }

    struct FakeTranscriber {
        text: String,
        language: Option<String>,
        unloaded: AtomicBool,
    }

    #[async_trait]
    impl Transcriber for FakeTranscriber {
        async fn load_model(&self, _size: ModelSize, _path: &Path) -> Result<(), DomainError> {
            Ok(())
        }

        fn is_model_loaded(&self, _size: ModelSize) -> bool {
            true
        }

        async fn transcribe(
            &self,
            _size: ModelSize,
            _audio: &AudioBuffer,
            _options: &TranscribeOptions,
        ) -> Result<RecognitionResult, DomainError> {
            Ok(RecognitionResult {
                text: self.text.clone(),
                language: self.language.clone(),
                duration_ms: 1,
            })
        }

        fn unload_all(&self) {
            self.unloaded.store(true, Ordering::Relaxed);
        }
    }

    struct FakeReader {
        fail: bool,
    }

    impl AudioReader for FakeReader {
        fn name(&self) -> &'static str {
            "fake"
        }

        fn read(&self, _path: &Path) -> Result<AudioBuffer, DomainError> {
            if self.fail {
                Err(DomainError::AudioDecode("not my format".to_string()))
            } else {
                Ok(AudioBuffer::from_mono(vec![0.0; 1_600], WHISPER_SAMPLE_RATE))
            }
        }
    }

    struct CollectSink {
        texts: Mutex<Vec<String>>,
    }

    impl TranscriptSink for CollectSink {
        fn persist(&self, text: &LogicalText) -> Result<(), DomainError> {
            self.texts.lock().push(text.as_str().to_string());
            Ok(())
        }
    }

    fn test_session(
        text: &str,
        language: Option<&str>,
        fail_decode: bool,
    ) -> (
        Arc<TranscriptionSession>,
        mpsc::UnboundedReceiver<SessionEvent>,
    ) {
        let pipeline = Arc::new(TextPipeline::with_capabilities(
            Arc::new(IdentityCapability),
            Arc::new(IdentityCapability),
            Arc::new(IdentityCapability),
            Arc::new(IdentityCapability),
            NormalizeOptions::default(),
        ));

        TranscriptionSession::new(
            Arc::new(FakeTranscriber {
                text: text.to_string(),
                language: language.map(str::to_string),
                unloaded: AtomicBool::new(false),
            }),
            Arc::new(FakeModelStore::new()),
            vec![Arc::new(FakeReader { fail: fail_decode })],
            pipeline,
            ModelSize::Tiny,
            TranscribeOptions::default(),
        )
    }

    #[tokio::test]
    async fn test_start_while_busy_is_noop() {
        let (session, _rx) = test_session("سلام", Some("fa"), false);
        let path = PathBuf::from("/tmp/in.wav");

        // The spawned task has not run yet on a current-thread runtime, so
        // the second call observes the busy flag set by the first.
        assert!(session.start(path.clone()));
        assert!(!session.start(path));
    }

    #[tokio::test]
    async fn test_events_arrive_in_order() {
        let (session, mut rx) = test_session("سلام ي كريم", Some("fa"), false);
        assert!(session.start(PathBuf::from("/tmp/in.wav")));

        assert!(matches!(
            rx.recv().await,
            Some(SessionEvent::ModelLoading { .. })
        ));
        assert!(matches!(
            rx.recv().await,
            Some(SessionEvent::ModelReady { .. })
        ));
        assert!(matches!(
            rx.recv().await,
            Some(SessionEvent::TranscriptionStarted)
        ));

        match rx.recv().await {
            Some(SessionEvent::TranscriptReady(transcript)) => {
                assert!(transcript.is_persian());
                assert_eq!(transcript.logical().as_str(), "سلام ی کریم");
            }
            other => panic!("expected TranscriptReady, got {:?}", other),
        }

        assert!(session.transcript().is_some());
    }

    #[tokio::test]
    async fn test_decode_failure_emits_failed_and_frees_session() {
        let (session, mut rx) = test_session("ignored", None, true);
        assert!(session.start(PathBuf::from("/tmp/in.wav")));

        loop {
            match rx.recv().await {
                Some(SessionEvent::Failed { message }) => {
                    assert!(message.contains("fake"));
                    break;
                }
                Some(_) => continue,
                None => panic!("channel closed before Failed event"),
            }
        }

        assert!(session.transcript().is_none());
        // Busy flag is released after the Failed event.
        while session.is_busy() {
            tokio::task::yield_now().await;
        }
        assert!(session.start(PathBuf::from("/tmp/in.wav")));
    }

    #[tokio::test]
    async fn test_save_exports_logical_text_only() {
        let (session, mut rx) = test_session("سلام ي", Some("fa"), false);
        assert!(session.start(PathBuf::from("/tmp/in.wav")));

        let transcript = loop {
            match rx.recv().await {
                Some(SessionEvent::TranscriptReady(t)) => break t,
                Some(_) => continue,
                None => panic!("channel closed"),
            }
        };

        let sink = CollectSink {
            texts: Mutex::new(Vec::new()),
        };
        session.save(&sink).unwrap();

        let saved = sink.texts.lock();
        assert_eq!(saved.as_slice(), &[transcript.logical().as_str().to_string()]);
    }

    #[tokio::test]
    async fn test_save_without_transcript_fails() {
        let (session, _rx) = test_session("سلام", None, false);
        let sink = CollectSink {
            texts: Mutex::new(Vec::new()),
        };
        assert!(session.save(&sink).is_err());
    }

    #[tokio::test]
    async fn test_release_models_unloads_recognizer_cache() {
        let transcriber = Arc::new(FakeTranscriber {
            text: "سلام".to_string(),
            language: Some("fa".to_string()),
            unloaded: AtomicBool::new(false),
        });
        let pipeline = Arc::new(TextPipeline::with_capabilities(
            Arc::new(IdentityCapability),
            Arc::new(IdentityCapability),
            Arc::new(IdentityCapability),
            Arc::new(IdentityCapability),
            NormalizeOptions::default(),
        ));
        let (session, _rx) = TranscriptionSession::new(
            transcriber.clone(),
            Arc::new(FakeModelStore::new()),
            vec![Arc::new(FakeReader { fail: false })],
            pipeline,
            ModelSize::Tiny,
            TranscribeOptions::default(),
        );

        assert!(!transcriber.unloaded.load(Ordering::Relaxed));
        session.release_models();
        assert!(transcriber.unloaded.load(Ordering::Relaxed));
    }

    #[tokio::test]
    async fn test_clear_drops_transcript() {
        let (session, mut rx) = test_session("سلام", Some("fa"), false);
        assert!(session.start(PathBuf::from("/tmp/in.wav")));

        loop {
            if let Some(SessionEvent::TranscriptReady(_)) = rx.recv().await {
                break;
            }
        }

        assert!(session.transcript().is_some());
        session.clear();
        assert!(session.transcript().is_none());
    }
}
