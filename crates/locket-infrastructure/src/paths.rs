//! Unified path management for locket's persisted files.
//!
//! All persisted artifacts live under the platform config directory
//! (`~/.config/locket/` on Linux), resolved via the `dirs` crate so the
//! layout is consistent across platforms.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for locket.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/locket/            # Config directory
/// ├── config.toml              # Backend connection settings
/// ├── session.json             # Persisted session token
/// └── profile.json             # Cached profile snapshot
/// ```
pub struct LocketPaths;

impl LocketPaths {
    /// Returns the locket configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/locket/`)
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("locket"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the backend settings file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted session token.
    ///
    /// # Security Note
    ///
    /// The token is stored as plaintext JSON; the file should carry
    /// restrictive permissions to prevent unauthorized access.
    pub fn session_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("session.json"))
    }

    /// Returns the path to the cached profile snapshot.
    pub fn profile_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("profile.json"))
    }
}
