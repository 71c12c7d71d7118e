//! Configuration management for KREG
//!
//! Handles loading, saving, and managing the application configuration
//! with support for atomic saves and platform-specific paths.

use crate::error::{ConfigError, Result};
use crate::models::{AppConfig, CURRENT_CONFIG_VERSION};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file name
const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable overriding the config directory
pub const CONFIG_HOME_ENV: &str = "KREG_CONFIG_HOME";

/// Manages the application configuration
#[derive(Debug, Clone)]
pub struct ConfigManager {
    /// Directory where config file is stored
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager rooted at an explicit directory.
    pub fn new(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Create a ConfigManager using the platform-specific config directory.
    ///
    /// - macOS: ~/Library/Application Support/kreg/
    /// - Linux: $XDG_CONFIG_HOME/kreg/
    /// - Windows: %APPDATA%\kreg\
    pub fn with_defaults() -> std::result::Result<Self, ConfigError> {
        if let Ok(override_path) = std::env::var(CONFIG_HOME_ENV) {
            return Ok(Self::new(PathBuf::from(override_path)));
        }

        let project_dirs =
            ProjectDirs::from("", "", "kreg").ok_or(ConfigError::NoConfigDirectory)?;

        Ok(Self::new(project_dirs.config_dir().to_path_buf()))
    }

    /// Get the path to the config file
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    /// Get the config directory
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Ensure the config directory exists
    pub fn ensure_directories(&self) -> Result<()> {
        fs::create_dir_all(&self.config_dir).map_err(ConfigError::Io)?;
        Ok(())
    }

    /// Load the configuration from disk.
    ///
    /// If the config file doesn't exist, returns a default configuration.
    pub fn load(&self) -> Result<AppConfig> {
        let config_path = self.config_path();

        if !config_path.exists() {
            return Ok(AppConfig::default());
        }

        let contents = fs::read_to_string(&config_path).map_err(ConfigError::Io)?;
        let mut config: AppConfig =
            serde_json::from_str(&contents).map_err(ConfigError::ParseError)?;

        self.migrate(&mut config);

        Ok(config)
    }

    /// Save the configuration to disk atomically.
    ///
    /// Writes to a temp file and renames it over the config file.
    pub fn save(&self, config: &AppConfig) -> Result<()> {
        self.ensure_directories()?;

        let config_path = self.config_path();
        let temp_path = config_path.with_extension("json.tmp");

        let contents = serde_json::to_string_pretty(config).map_err(ConfigError::ParseError)?;
        fs::write(&temp_path, contents).map_err(ConfigError::Io)?;
        fs::rename(&temp_path, &config_path).map_err(ConfigError::Io)?;

        tracing::debug!("saved config to {}", config_path.display());

        Ok(())
    }

    /// Load, modify, and save the configuration.
    ///
    /// Nothing is written if `update_fn` fails.
    pub fn update<F>(&self, update_fn: F) -> Result<AppConfig>
    where
        F: FnOnce(&mut AppConfig) -> Result<()>,
    {
        let mut config = self.load()?;
        update_fn(&mut config)?;
        self.save(&config)?;
        Ok(config)
    }

    fn migrate(&self, config: &mut AppConfig) {
        if config.config_version < CURRENT_CONFIG_VERSION {
            config.config_version = CURRENT_CONFIG_VERSION;
        }
    }

    /// Check if the config directory is writable
    pub fn is_config_dir_writable(&self) -> bool {
        if self.ensure_directories().is_err() {
            return false;
        }

        let test_file = self.config_dir.join(".write_test");
        if fs::write(&test_file, "test").is_ok() {
            let _ = fs::remove_file(&test_file);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KregError;
    use crate::models::DEFAULT_REGISTRY_NAME;
    use tempfile::TempDir;

    fn test_config_manager() -> (ConfigManager, TempDir) {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::new(temp.path().join("config"));
        (manager, temp)
    }

    #[test]
    fn test_config_round_trip() {
        let (manager, _temp) = test_config_manager();

        let mut config = AppConfig::default();
        config.registry.network = "devnet".to_string();

        manager.save(&config).unwrap();
        let loaded = manager.load().unwrap();

        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let (manager, _temp) = test_config_manager();

        let config = manager.load().unwrap();
        assert_eq!(config.registry.name, DEFAULT_REGISTRY_NAME);
        assert_eq!(config.config_version, CURRENT_CONFIG_VERSION);
    }

    #[test]
    fn test_load_migrates_old_version() {
        let (manager, _temp) = test_config_manager();
        manager.ensure_directories().unwrap();
        fs::write(manager.config_path(), r#"{ "config_version": 0 }"#).unwrap();

        let config = manager.load().unwrap();
        assert_eq!(config.config_version, CURRENT_CONFIG_VERSION);
    }

    #[test]
    fn test_load_corrupt_config_fails() {
        let (manager, _temp) = test_config_manager();
        manager.ensure_directories().unwrap();
        fs::write(manager.config_path(), "{ not json").unwrap();

        assert!(matches!(
            manager.load(),
            Err(KregError::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_atomic_save() {
        let (manager, _temp) = test_config_manager();

        manager.save(&AppConfig::default()).unwrap();

        let temp_path = manager.config_path().with_extension("json.tmp");
        assert!(!temp_path.exists());
        assert!(manager.config_path().exists());
    }

    #[test]
    fn test_update() {
        let (manager, _temp) = test_config_manager();

        manager
            .update(|c| c.registry.set("name", "updated-reg"))
            .unwrap();

        assert_eq!(manager.load().unwrap().registry.name, "updated-reg");
    }

    #[test]
    fn test_failed_update_writes_nothing() {
        let (manager, _temp) = test_config_manager();

        let result = manager.update(|c| c.registry.set("bogus", "value"));

        assert!(result.is_err());
        assert!(!manager.config_path().exists());
    }

    #[test]
    fn test_config_dir_writable() {
        let (manager, _temp) = test_config_manager();

        assert!(manager.is_config_dir_writable());
        assert!(manager.config_dir().exists());
    }
}
