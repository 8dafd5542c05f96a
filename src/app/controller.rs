use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::mpsc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

use crate::adapters::{
    HoundWavReader, LocalModelStore, SymphoniaAudioReader, TomlConfigStore, WhisperCppTranscriber,
};
use crate::app::session::{SessionEvent, TranscriptionSession};
use crate::domain::{AppConfig, DomainError};
use crate::infrastructure::init_logging;
use crate::ports::{AudioReader, ConfigStore, TranscribeOptions};
use crate::text::TextPipeline;

/// Application controller that orchestrates initialization and manages
/// global state.
pub struct AppController {
    config: RwLock<AppConfig>,
    config_store: Arc<TomlConfigStore>,
    _log_guard: Option<WorkerGuard>,
}

impl AppController {
    /// Initialize the application controller.
    /// This sets up configuration and logging.
    pub fn new() -> Result<Self, DomainError> {
        let config_store = Arc::new(TomlConfigStore::new()?);
        let config = config_store.load()?;

        let log_guard = init_logging(&config_store.logs_dir(), &config.logging)?;

        info!("Parscribe starting up");

        Ok(Self {
            config: RwLock::new(config),
            config_store,
            _log_guard: log_guard,
        })
    }

    /// Build a transcription session from the current configuration.
    ///
    /// WAV decoding is tried first; symphonia handles everything else.
    pub fn create_session(
        &self,
    ) -> Result<
        (
            Arc<TranscriptionSession>,
            mpsc::UnboundedReceiver<SessionEvent>,
        ),
        DomainError,
    > {
        let config = self.config.read().clone();

        let transcriber = Arc::new(WhisperCppTranscriber::new(config.transcription.threads));
        let model_store = Arc::new(LocalModelStore::new(self.config_store.data_dir())?);
        let readers: Vec<Arc<dyn AudioReader>> = vec![
            Arc::new(HoundWavReader),
            Arc::new(SymphoniaAudioReader),
        ];
        let pipeline = Arc::new(TextPipeline::standard(&config.text));

        let options = TranscribeOptions {
            language: config.transcription.language_hint().map(str::to_string),
            threads: config.transcription.threads,
        };

        Ok(TranscriptionSession::new(
            transcriber,
            model_store,
            readers,
            pipeline,
            config.transcription.model_size,
            options,
        ))
    }

    /// Get the current configuration.
    pub fn config(&self) -> AppConfig {
        self.config.read().clone()
    }

    /// Update the configuration.
    pub fn update_config(&self, config: AppConfig) -> Result<(), DomainError> {
        self.config_store.save(&config)?;
        *self.config.write() = config;

        info!("Configuration updated");
        Ok(())
    }

    /// Get the data directory path.
    pub fn data_dir(&self) -> String {
        self.config_store.data_dir().to_string_lossy().to_string()
    }

    /// Get the logs directory path.
    pub fn logs_dir(&self) -> String {
        self.config_store.logs_dir().to_string_lossy().to_string()
    }

    /// Get the config file path.
    pub fn config_path(&self) -> String {
        self.config_store.config_path().to_string_lossy().to_string()
    }
}
