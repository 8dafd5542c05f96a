use serde::{Deserialize, Serialize};

use crate::domain::model::ModelSize;

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub level: String,
    /// Enable file logging with daily rotation.
    pub file_logging: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_logging: true,
        }
    }
}

/// Transcription configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionConfig {
    /// Model size to load.
    pub model_size: ModelSize,
    /// Language code (e.g. "fa", "en") or "auto" for detection.
    pub language: String,
    /// Number of inference threads (0 = auto).
    pub threads: u32,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            model_size: ModelSize::Small,
            language: "auto".to_string(),
            threads: 0,
        }
    }
}

impl TranscriptionConfig {
    /// Language to request from the recognizer; None means auto-detect.
    pub fn language_hint(&self) -> Option<&str> {
        match self.language.as_str() {
            "" | "auto" => None,
            other => Some(other),
        }
    }
}

/// Persian text pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Convert Western digits (0-9) to Persian digits in normalized output.
    pub convert_digits: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            convert_digits: true,
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub transcription: TranscriptionConfig,
    pub text: TextConfig,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }
}
