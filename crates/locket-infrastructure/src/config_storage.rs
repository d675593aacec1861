//! Backend settings file storage.
//!
//! Loads `config.toml` from the locket config directory; a missing file
//! yields the default settings so a fresh install works without any setup.

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use locket_core::config::BackendConfig;
use locket_core::error::{LocketError, Result};

use crate::paths::{LocketPaths, PathError};

/// Root shape of `config.toml`.
#[derive(Deserialize, Default)]
struct ConfigRoot {
    #[serde(default)]
    backend: Option<BackendConfig>,
}

/// Storage for the backend settings file (config.toml).
///
/// Responsibilities:
/// - Load config.toml from the locket config directory
/// - Parse TOML into the `BackendConfig` domain model
/// - Fall back to defaults when the file is missing
///
/// Does NOT:
/// - Write or modify config files (read-only)
/// - Validate that the configured origin is reachable
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    /// Creates a new ConfigStorage with the default path
    /// (`~/.config/locket/config.toml`).
    pub fn new() -> std::result::Result<Self, PathError> {
        Ok(Self {
            path: LocketPaths::config_file()?,
        })
    }

    /// Creates a new ConfigStorage with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the backend settings.
    ///
    /// # Returns
    ///
    /// - `Ok(BackendConfig)`: Parsed settings, or defaults if the file is
    ///   missing or has no `[backend]` table
    /// - `Err`: Failed to read or parse an existing file
    pub fn load(&self) -> Result<BackendConfig> {
        if !self.path.exists() {
            return Ok(BackendConfig::default());
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| LocketError::persistence(e.to_string()))?;
        let root: ConfigRoot = toml::from_str(&content)
            .map_err(|e| LocketError::serialization(format!("Invalid config.toml: {}", e)))?;

        Ok(root.backend.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ConfigStorage::with_path(temp_dir.path().join("config.toml"));

        assert_eq!(storage.load().unwrap(), BackendConfig::default());
    }

    #[test]
    fn test_load_backend_table() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[backend]
base_url = "http://localhost:8080"
timeout_secs = 3
"#,
        )
        .unwrap();

        let config = ConfigStorage::with_path(path).load().unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn test_partial_table_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[backend]
base_url = "http://localhost:8080"
"#,
        )
        .unwrap();

        let config = ConfigStorage::with_path(path).load().unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, BackendConfig::default().timeout_secs);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[backend").unwrap();

        let result = ConfigStorage::with_path(path).load();
        assert!(matches!(result, Err(LocketError::Serialization { .. })));
    }
}
