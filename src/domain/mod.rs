pub mod audio;
pub mod config;
pub mod error;
pub mod model;
pub mod transcript;

pub use audio::{AudioBuffer, WHISPER_SAMPLE_RATE};
pub use config::AppConfig;
pub use error::DomainError;
pub use model::{DownloadProgress, InstalledModel, ModelCatalog, ModelEntry, ModelSize};
pub use transcript::{LogicalText, Transcript, VisualText};
