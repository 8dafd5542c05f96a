use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::domain::{AppConfig, DomainError};
use crate::ports::ConfigStore;

/// TOML-based configuration store with OS-specific paths.
pub struct TomlConfigStore {
    data_dir: PathBuf,
}

impl TomlConfigStore {
    /// Create a new TomlConfigStore.
    /// Uses OS-specific application data directories.
    pub fn new() -> Result<Self, DomainError> {
        let data_dir = Self::get_data_dir()?;
        Self::with_data_dir(data_dir)
    }

    /// Create a store rooted at an explicit directory. Used by tests and
    /// portable installs.
    pub fn with_data_dir(data_dir: PathBuf) -> Result<Self, DomainError> {
        fs::create_dir_all(&data_dir)?;

        info!(data_dir = ?data_dir, "ConfigStore initialized");

        Ok(Self { data_dir })
    }

    /// Get the OS-specific application data directory.
    /// - macOS: ~/Library/Application Support/Parscribe/
    /// - Windows: %APPDATA%\Parscribe\
    /// - Linux: ~/.config/Parscribe/
    fn get_data_dir() -> Result<PathBuf, DomainError> {
        #[cfg(target_os = "macos")]
        {
            dirs::data_dir()
                .map(|p| p.join("Parscribe"))
                .ok_or_else(|| {
                    DomainError::Config("Could not find application data directory".to_string())
                })
        }

        #[cfg(not(target_os = "macos"))]
        {
            dirs::config_dir()
                .map(|p| p.join("Parscribe"))
                .ok_or_else(|| {
                    DomainError::Config("Could not find application data directory".to_string())
                })
        }
    }

    /// Get the OS-specific log directory.
    /// - macOS: ~/Library/Application Support/Parscribe/logs/
    /// - Windows: %LOCALAPPDATA%\Parscribe\logs\
    /// - Linux: ~/.local/share/Parscribe/logs/
    fn get_logs_dir(&self) -> PathBuf {
        #[cfg(target_os = "macos")]
        {
            self.data_dir.join("logs")
        }

        #[cfg(target_os = "windows")]
        {
            dirs::data_local_dir()
                .map(|p| p.join("Parscribe").join("logs"))
                .unwrap_or_else(|| self.data_dir.join("logs"))
        }

        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            dirs::data_dir()
                .map(|p| p.join("Parscribe").join("logs"))
                .unwrap_or_else(|| self.data_dir.join("logs"))
        }
    }
}

impl ConfigStore for TomlConfigStore {
    fn load(&self) -> Result<AppConfig, DomainError> {
        let config_path = self.config_path();

        if config_path.exists() {
            debug!(path = ?config_path, "Loading configuration");
            let content = fs::read_to_string(&config_path)?;
            let config: AppConfig = toml::from_str(&content)?;
            info!(path = ?config_path, "Configuration loaded");
            Ok(config)
        } else {
            info!(path = ?config_path, "Configuration file not found, creating default");
            let config = AppConfig::new();
            self.save(&config)?;
            Ok(config)
        }
    }

    fn save(&self, config: &AppConfig) -> Result<(), DomainError> {
        let config_path = self.config_path();

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(config)?;
        fs::write(&config_path, content)?;

        info!(path = ?config_path, "Configuration saved");
        Ok(())
    }

    fn config_path(&self) -> PathBuf {
        self.data_dir.join("config.toml")
    }

    fn data_dir(&self) -> PathBuf {
        self.data_dir.clone()
    }

    fn logs_dir(&self) -> PathBuf {
        self.get_logs_dir()
    }
}
