use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures_util::StreamExt;
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::domain::{
    DomainError, DownloadProgress, InstalledModel, ModelCatalog, ModelSize,
};
use crate::ports::ModelStore;

/// Embedded catalog of whisper.cpp GGML models.
const CATALOG_JSON: &str = include_str!("../../resources/model_catalog.json");

/// Filesystem model store that downloads missing models on first use,
/// mirroring the recognizer library's `load(size_key)` behavior.
pub struct LocalModelStore {
    catalog: ModelCatalog,
    models_dir: PathBuf,
    installed: RwLock<Vec<InstalledModel>>,
    client: reqwest::Client,
}

impl LocalModelStore {
    /// Create a store rooted at `data_dir/models`.
    pub fn new(data_dir: PathBuf) -> Result<Self, DomainError> {
        let catalog: ModelCatalog = serde_json::from_str(CATALOG_JSON)
            .map_err(|e| DomainError::Config(format!("Failed to parse model catalog: {}", e)))?;

        let models_dir = data_dir.join("models");
        fs::create_dir_all(&models_dir)?;

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(format!("Parscribe/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DomainError::Http(format!("Failed to create HTTP client: {}", e)))?;

        let store = Self {
            catalog,
            models_dir,
            installed: RwLock::new(Vec::new()),
            client,
        };

        store.scan_installed()?;

        info!(
            models_dir = ?store.models_dir,
            catalog_version = store.catalog.version,
            installed_count = store.installed.read().len(),
            "LocalModelStore initialized"
        );

        Ok(store)
    }

    /// File name for a model of the given size: `ggml-{size}.bin`.
    fn file_name(size: ModelSize) -> String {
        format!("ggml-{}.bin", size.key())
    }

    fn target_path(&self, size: ModelSize) -> PathBuf {
        self.models_dir.join(Self::file_name(size))
    }

    /// Scan the models directory for installed models.
    fn scan_installed(&self) -> Result<(), DomainError> {
        let mut installed = self.installed.write();
        installed.clear();

        for entry in fs::read_dir(&self.models_dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            let Some(size) = filename
                .strip_prefix("ggml-")
                .and_then(|rest| rest.strip_suffix(".bin"))
                .and_then(ModelSize::from_key)
            else {
                continue;
            };

            let size_bytes = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
            debug!(size = %size, path = ?path, "Found installed model");
            installed.push(InstalledModel {
                size,
                path,
                size_bytes,
            });
        }

        Ok(())
    }

    /// Stream the model file to a temp path, then rename atomically.
    async fn download(
        &self,
        size: ModelSize,
        url: &str,
        target: &Path,
        progress: Option<Box<dyn Fn(DownloadProgress) + Send + Sync>>,
    ) -> Result<(), DomainError> {
        info!(size = %size, url = url, target = ?target, "Starting model download");

        let response = self
            .client
            .get(url)
            .timeout(std::time::Duration::from_secs(3600))
            .send()
            .await
            .map_err(|e| DomainError::ModelDownload(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::ModelDownload(format!(
                "HTTP {} for {}",
                status, url
            )));
        }

        let total_size = response.content_length().unwrap_or(0);
        let temp_path = target.with_extension("download");

        let cleanup = |temp: PathBuf| async move {
            let _ = tokio::fs::remove_file(&temp).await;
        };

        let mut file = match tokio::fs::File::create(&temp_path).await {
            Ok(f) => f,
            Err(e) => {
                cleanup(temp_path.clone()).await;
                return Err(DomainError::Io(e.to_string()));
            }
        };

        let mut downloaded: u64 = 0;
        let mut stream = response.bytes_stream();

        while let Some(chunk_result) = stream.next().await {
            let chunk = match chunk_result {
                Ok(c) => c,
                Err(e) => {
                    drop(file);
                    cleanup(temp_path.clone()).await;
                    return Err(DomainError::ModelDownload(e.to_string()));
                }
            };

            if let Err(e) = file.write_all(&chunk).await {
                drop(file);
                cleanup(temp_path.clone()).await;
                return Err(DomainError::Io(e.to_string()));
            }

            downloaded += chunk.len() as u64;

            if let Some(callback) = &progress {
                let mut dp = DownloadProgress::new(size);
                dp.update(downloaded, total_size);
                callback(dp);
            }
        }

        if let Err(e) = file.flush().await {
            drop(file);
            cleanup(temp_path.clone()).await;
            return Err(DomainError::Io(e.to_string()));
        }
        drop(file);

        if let Err(e) = tokio::fs::rename(&temp_path, target).await {
            cleanup(temp_path).await;
            return Err(DomainError::Io(e.to_string()));
        }

        info!(size = %size, bytes = downloaded, "Model downloaded");
        Ok(())
    }

    /// Calculate the SHA-256 hash of a file.
    fn calculate_sha256(path: &Path) -> Result<String, DomainError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let mut hasher = Sha256::new();

        let mut buffer = [0u8; 8192];
        loop {
            let bytes_read = reader
                .read(&mut buffer)
                .map_err(|e| DomainError::Io(e.to_string()))?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
        }

        Ok(format!("{:x}", hasher.finalize()))
    }
}

#[async_trait]
impl ModelStore for LocalModelStore {
    fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    fn list_installed(&self) -> Result<Vec<InstalledModel>, DomainError> {
        Ok(self.installed.read().clone())
    }

    fn is_installed(&self, size: ModelSize) -> bool {
        self.installed.read().iter().any(|m| m.size == size)
    }

    fn model_path(&self, size: ModelSize) -> Option<PathBuf> {
        self.installed
            .read()
            .iter()
            .find(|m| m.size == size)
            .map(|m| m.path.clone())
    }

    async fn ensure(
        &self,
        size: ModelSize,
        progress: Option<Box<dyn Fn(DownloadProgress) + Send + Sync>>,
    ) -> Result<PathBuf, DomainError> {
        if let Some(path) = self.model_path(size) {
            debug!(size = %size, path = ?path, "Model already installed");
            return Ok(path);
        }

        let entry = self
            .catalog
            .get(size)
            .ok_or_else(|| DomainError::ModelNotFound(size.key().to_string()))?;
        let url = entry.url.clone();
        let expected_sha256 = entry.sha256.clone();

        let target = self.target_path(size);
        self.download(size, &url, &target, progress).await?;

        if let Some(expected) = expected_sha256 {
            let actual = Self::calculate_sha256(&target)?;
            if actual != expected {
                let _ = fs::remove_file(&target);
                return Err(DomainError::ModelVerification { expected, actual });
            }
        }

        let size_bytes = fs::metadata(&target)?.len();
        self.installed.write().push(InstalledModel {
            size,
            path: target.clone(),
            size_bytes,
        });

        info!(size = %size, size_mb = size_bytes / (1024 * 1024), "Model installed");
        Ok(target)
    }

    fn verify(&self, size: ModelSize) -> Result<bool, DomainError> {
        let path = self
            .model_path(size)
            .ok_or_else(|| DomainError::ModelNotFound(size.key().to_string()))?;

        let entry = self
            .catalog
            .get(size)
            .ok_or_else(|| DomainError::ModelNotFound(size.key().to_string()))?;

        let Some(expected) = &entry.sha256 else {
            // No published checksum; size sanity is the best we can do.
            return Ok(true);
        };

        let actual = Self::calculate_sha256(&path)?;
        let valid = &actual == expected;

        if !valid {
            warn!(
                size = %size,
                expected = %expected,
                actual = %actual,
                "Model verification failed"
            );
        }

        Ok(valid)
    }

    fn delete(&self, size: ModelSize) -> Result<(), DomainError> {
        let path = self
            .model_path(size)
            .ok_or_else(|| DomainError::ModelNotFound(size.key().to_string()))?;

        fs::remove_file(&path)?;
        self.installed.write().retain(|m| m.size != size);

        info!(size = %size, "Model deleted");
        Ok(())
    }

    fn models_dir(&self) -> PathBuf {
        self.models_dir.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_catalog_parses_and_covers_all_sizes() {
        let catalog: ModelCatalog = serde_json::from_str(CATALOG_JSON).unwrap();
        assert!(catalog.version >= 1);
        for size in ModelSize::all() {
            let entry = catalog.get(size).expect("missing catalog entry");
            assert!(entry.url.starts_with("https://"));
            assert!(entry.approx_size_bytes > 0);
        }
    }

    #[test]
    fn test_scan_finds_model_files() {
        let temp_dir = env::temp_dir().join("parscribe_model_store_scan");
        let _ = fs::remove_dir_all(&temp_dir);
        fs::create_dir_all(temp_dir.join("models")).unwrap();
        fs::write(temp_dir.join("models/ggml-tiny.bin"), b"stub").unwrap();
        fs::write(temp_dir.join("models/notes.txt"), b"ignored").unwrap();

        let store = LocalModelStore::new(temp_dir.clone()).unwrap();
        assert!(store.is_installed(ModelSize::Tiny));
        assert!(!store.is_installed(ModelSize::Large));
        assert_eq!(store.list_installed().unwrap().len(), 1);

        let _ = fs::remove_dir_all(&temp_dir);
    }

    #[test]
    fn test_target_path_naming() {
        let temp_dir = env::temp_dir().join("parscribe_model_store_paths");
        let _ = fs::remove_dir_all(&temp_dir);
        let store = LocalModelStore::new(temp_dir.clone()).unwrap();

        let path = store.target_path(ModelSize::Medium);
        assert!(path.ends_with("ggml-medium.bin"));

        let _ = fs::remove_dir_all(&temp_dir);
    }

    #[test]
    fn test_delete_missing_model_fails() {
        let temp_dir = env::temp_dir().join("parscribe_model_store_delete");
        let _ = fs::remove_dir_all(&temp_dir);
        let store = LocalModelStore::new(temp_dir.clone()).unwrap();

        let result = store.delete(ModelSize::Base);
        assert!(matches!(result, Err(DomainError::ModelNotFound(_))));

        let _ = fs::remove_dir_all(&temp_dir);
    }
}
