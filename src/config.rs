//! Configuration management module.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration load result.
#[derive(Debug)]
pub enum ConfigLoadResult {
    /// Config loaded successfully.
    Loaded(AppConfig),
    /// Config file missing (first run).
    Missing,
    /// Config file exists but invalid.
    Invalid(ConfigError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub assets: AssetConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Where persisted slots live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Slot directory. Empty means the platform data directory.
    #[serde(default)]
    pub data_dir: String,
    /// Slot holding the appointment collection.
    #[serde(default = "default_appointments_slot")]
    pub appointments_slot: String,
    /// Slot holding the login session.
    #[serde(default = "default_session_slot")]
    pub session_slot: String,
}

fn default_appointments_slot() -> String {
    "appointments".to_string()
}

fn default_session_slot() -> String {
    "session".to_string()
}

/// Doctor portrait lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Directory that `/images/...` references resolve against.
    /// Empty means `assets` next to the executable.
    #[serde(default)]
    pub root: String,
}

/// UI preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub window_width: f32,
    pub window_height: f32,
    /// How often other instances' slot changes are picked up (default: 1000).
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
}

fn default_refresh_interval_ms() -> u64 {
    1000
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
    /// Write a daily rolling log file next to the slots.
    pub to_file: bool,
}

impl AppConfig {
    /// Get config file path in the platform config directory.
    pub fn default_path() -> PathBuf {
        project_dirs()
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Attempt to load config with detailed result.
    pub fn try_load(path: &Path) -> ConfigLoadResult {
        if !path.exists() {
            return ConfigLoadResult::Missing;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => match config.validate() {
                    Ok(()) => ConfigLoadResult::Loaded(config),
                    Err(e) => ConfigLoadResult::Invalid(e),
                },
                Err(e) => ConfigLoadResult::Invalid(ConfigError::Parse(e)),
            },
            Err(e) => ConfigLoadResult::Invalid(ConfigError::Read(e)),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, key) in [
            ("Appointments slot", &self.storage.appointments_slot),
            ("Session slot", &self.storage.session_slot),
        ] {
            if key.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
            }
            if !crate::storage::is_valid_key(key) {
                return Err(ConfigError::Validation(format!(
                    "{} may only contain letters, digits, '-' and '_'",
                    name
                )));
            }
        }
        if self.storage.appointments_slot == self.storage.session_slot {
            return Err(ConfigError::Validation(
                "Appointments and session slots must differ".to_string(),
            ));
        }
        if self.ui.window_width < 640.0 || self.ui.window_height < 480.0 {
            return Err(ConfigError::Validation(
                "Window must be at least 640x480".to_string(),
            ));
        }
        if self.ui.refresh_interval_ms < 100 {
            return Err(ConfigError::Validation(
                "Refresh interval must be at least 100 ms".to_string(),
            ));
        }
        if self.log.level.trim().is_empty() {
            return Err(ConfigError::Validation("Log level cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl StorageConfig {
    /// Resolve the slot directory.
    pub fn data_dir(&self) -> PathBuf {
        if !self.data_dir.trim().is_empty() {
            return PathBuf::from(&self.data_dir);
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("data"))
    }
}

impl AssetConfig {
    /// Resolve the asset directory.
    pub fn root(&self) -> PathBuf {
        if !self.root.trim().is_empty() {
            return PathBuf::from(&self.root);
        }
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("assets")
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "HealthConnect", "healthconnect")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: String::new(),
            appointments_slot: default_appointments_slot(),
            session_slot: default_session_slot(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_width: 1000.0,
            window_height: 720.0,
            refresh_interval_ms: default_refresh_interval_ms(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            to_file: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let storage = StorageConfig {
            data_dir: "/tmp/hc".to_string(),
            ..Default::default()
        };
        assert_eq!(storage.data_dir(), PathBuf::from("/tmp/hc"));
    }

    #[test]
    fn test_validation_slot_keys() {
        let mut config = AppConfig::default();
        config.storage.appointments_slot = String::new();
        assert!(config.validate().is_err());

        config.storage.appointments_slot = "../escape".to_string();
        assert!(config.validate().is_err());

        config.storage.appointments_slot = "session".to_string();
        assert!(config.validate().is_err());

        config.storage.appointments_slot = "appointments".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_refresh_interval() {
        let mut config = AppConfig::default();
        config.ui.refresh_interval_ms = 10;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: AppConfig = toml::from_str("[log]\nlevel = \"debug\"\nto_file = false\n").unwrap();
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.storage.appointments_slot, "appointments");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.ui.refresh_interval_ms = 2500;
        config.save(&path).unwrap();

        match AppConfig::try_load(&path) {
            ConfigLoadResult::Loaded(loaded) => assert_eq!(loaded.ui.refresh_interval_ms, 2500),
            other => panic!("unexpected load result: {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            AppConfig::try_load(&dir.path().join("absent.toml")),
            ConfigLoadResult::Missing
        ));
    }
}
