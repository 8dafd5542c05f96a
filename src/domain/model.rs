use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Whisper model size. Bigger models are slower and more accurate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelSize {
    Tiny,
    Base,
    Small,
    Medium,
    Large,
}

impl ModelSize {
    /// Stable key used for cache lookup and file naming.
    pub fn key(&self) -> &'static str {
        match self {
            ModelSize::Tiny => "tiny",
            ModelSize::Base => "base",
            ModelSize::Small => "small",
            ModelSize::Medium => "medium",
            ModelSize::Large => "large",
        }
    }

    /// Parse a size from its key.
    pub fn from_key(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tiny" => Some(ModelSize::Tiny),
            "base" => Some(ModelSize::Base),
            "small" => Some(ModelSize::Small),
            "medium" => Some(ModelSize::Medium),
            "large" => Some(ModelSize::Large),
            _ => None,
        }
    }

    pub fn all() -> [ModelSize; 5] {
        [
            ModelSize::Tiny,
            ModelSize::Base,
            ModelSize::Small,
            ModelSize::Medium,
            ModelSize::Large,
        ]
    }
}

impl std::fmt::Display for ModelSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// One downloadable model in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelEntry {
    /// Model size this entry provides.
    pub size: ModelSize,
    /// Download URL for the GGML file.
    pub url: String,
    /// Approximate file size in bytes, for display and disk-space checks.
    pub approx_size_bytes: u64,
    /// SHA-256 checksum, when the upstream publishes a stable one.
    /// Verification is skipped when absent.
    pub sha256: Option<String>,
}

/// Catalog of known whisper.cpp GGML models.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelCatalog {
    /// Catalog version for compatibility checking.
    pub version: u32,
    pub models: Vec<ModelEntry>,
}

impl ModelCatalog {
    pub fn get(&self, size: ModelSize) -> Option<&ModelEntry> {
        self.models.iter().find(|m| m.size == size)
    }
}

/// A model file present on the local filesystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstalledModel {
    pub size: ModelSize,
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Progress of a model download.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadProgress {
    pub size: ModelSize,
    pub bytes_downloaded: u64,
    /// Total bytes, 0 if the server did not report a length.
    pub total_bytes: u64,
}

impl DownloadProgress {
    pub fn new(size: ModelSize) -> Self {
        Self {
            size,
            bytes_downloaded: 0,
            total_bytes: 0,
        }
    }

    pub fn update(&mut self, downloaded: u64, total: u64) {
        self.bytes_downloaded = downloaded;
        self.total_bytes = total;
    }

    pub fn percent(&self) -> f32 {
        if self.total_bytes > 0 {
            (self.bytes_downloaded as f32 / self.total_bytes as f32) * 100.0
        } else {
            0.0
        }
    }
}
