//! Configuration file handling for ~/.markermap/config.ini.
//!
//! Loads and saves configuration with sensible defaults.
//! Settings structs live in [`super::settings`], constants in [`super::defaults`],
//! parsing in [`super::parser`], and serialization in [`super::writer`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use ini::Ini;
use thiserror::Error;

use super::settings::ConfigFile;

use crate::dedup::ResolverConfig;
use crate::loader::PollerConfig;
use crate::provider::ProviderConfig;
use crate::session::SessionConfig;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFile {
    /// Load configuration from the default path (~/.markermap/config.ini).
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save configuration to the default path (~/.markermap/config.ini).
    pub fn save(&self) -> Result<(), ConfigFileError> {
        self.save_to(&config_file_path())
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        let content = super::writer::to_config_string(self);
        std::fs::write(path, content).map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// Create the default config file if it doesn't exist.
    ///
    /// Returns the path to the config file.
    pub fn ensure_exists() -> Result<PathBuf, ConfigFileError> {
        let path = config_file_path();
        if !path.exists() {
            Self::default().save_to(&path)?;
        }
        Ok(path)
    }

    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig::new(self.provider.base_url.clone())
            .with_timeout(Duration::from_secs(self.provider.timeout))
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig::new()
            .with_step_degrees(self.placement.dedup_step)
            .with_max_rings(self.placement.max_rings)
    }

    pub fn poller_config(&self) -> PollerConfig {
        let max_attempts = (self.loader.max_polls > 0).then_some(self.loader.max_polls);
        PollerConfig::new()
            .with_interval(Duration::from_millis(self.loader.poll_interval_ms))
            .with_max_attempts(max_attempts)
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            resolver: self.resolver_config(),
            poller: self.poller_config(),
            focus_zoom: self.placement.focus_zoom,
        }
    }

    /// Full path of the log file.
    pub fn log_file_path(&self) -> PathBuf {
        self.logging.directory.join(&self.logging.file)
    }
}

/// Get the path to the config directory (~/.markermap).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".markermap")
}

/// Get the path to the config file (~/.markermap/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::DEFAULT_POLL_INTERVAL_MS;

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();

        assert_eq!(config.provider.base_url, "http://localhost:8000");
        assert_eq!(config.provider.timeout, 30);
        assert!(config.provider.season.is_none());
        assert!(config.provider.regions.is_empty());
        assert_eq!(config.placement.max_rings, 10);
        assert_eq!(config.placement.focus_zoom, 12);
        assert_eq!(config.loader.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
        assert_eq!(config.log_file_path(), PathBuf::from("logs/markermap.log"));
    }

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.ini");

        let config = ConfigFile::load_from(&config_path).unwrap();

        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.ini");

        ConfigFile::default().save_to(&config_path).unwrap();

        assert!(config_path.exists());
    }

    #[test]
    fn test_runtime_conversions() {
        let mut config = ConfigFile::default();
        config.placement.dedup_step = 0.005;
        config.placement.max_rings = 3;
        config.loader.poll_interval_ms = 200;

        let resolver = config.resolver_config();
        assert_eq!(resolver.step_degrees(), 0.005);
        assert_eq!(resolver.max_rings(), 3);

        let poller = config.poller_config();
        assert_eq!(poller.interval(), Duration::from_millis(200));
        assert_eq!(poller.max_attempts(), None);

        config.loader.max_polls = 5;
        assert_eq!(config.poller_config().max_attempts(), Some(5));

        let provider = config.provider_config();
        assert_eq!(provider.timeout(), Duration::from_secs(30));
        assert_eq!(config.session_config().focus_zoom, 12);
    }
}
