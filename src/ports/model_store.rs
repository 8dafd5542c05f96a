use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::{DomainError, DownloadProgress, InstalledModel, ModelCatalog, ModelSize};

/// Port for resolving model files on disk, downloading them on first use.
///
/// Mirrors the behavior of `load(size_key)` in the recognizer library:
/// a model that is already installed resolves immediately, otherwise it is
/// fetched, verified when a checksum is known, and installed atomically.
#[async_trait]
pub trait ModelStore: Send + Sync {
    /// The catalog of known models.
    fn catalog(&self) -> &ModelCatalog;

    /// List models present on disk.
    fn list_installed(&self) -> Result<Vec<InstalledModel>, DomainError>;

    /// Check whether a model of the given size is installed.
    fn is_installed(&self, size: ModelSize) -> bool;

    /// Path of an installed model, None when absent.
    fn model_path(&self, size: ModelSize) -> Option<PathBuf>;

    /// Resolve the model path, downloading it first when missing.
    async fn ensure(
        &self,
        size: ModelSize,
        progress: Option<Box<dyn Fn(DownloadProgress) + Send + Sync>>,
    ) -> Result<PathBuf, DomainError>;

    /// Verify an installed model against its catalog checksum.
    /// Returns true when no checksum is published for it.
    fn verify(&self, size: ModelSize) -> Result<bool, DomainError>;

    /// Delete an installed model.
    fn delete(&self, size: ModelSize) -> Result<(), DomainError>;

    /// Directory holding the model files.
    fn models_dir(&self) -> PathBuf;
}
