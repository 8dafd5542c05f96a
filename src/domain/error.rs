use thiserror::Error;

/// Domain-level errors for Parscribe.
///
/// `Capability` errors are always recovered inside the text pipeline and never
/// reach the orchestration layer; everything else propagates to the session,
/// which reports it and resets its processing state.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Capability '{name}' failed: {message}")]
    Capability { name: &'static str, message: String },

    #[error("Audio decode error: {0}")]
    AudioDecode(String),

    #[error("Transcription error: {0}")]
    Transcription(String),

    #[error("Model load error: {0}")]
    ModelLoad(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Model download failed: {0}")]
    ModelDownload(String),

    #[error("Model verification failed: expected {expected}, got {actual}")]
    ModelVerification { expected: String, actual: String },

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

impl DomainError {
    /// Shorthand for a capability failure.
    pub fn capability(name: &'static str, message: impl Into<String>) -> Self {
        DomainError::Capability {
            name,
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for DomainError {
    fn from(err: toml::de::Error) -> Self {
        DomainError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for DomainError {
    fn from(err: toml::ser::Error) -> Self {
        DomainError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Serialization(err.to_string())
    }
}
