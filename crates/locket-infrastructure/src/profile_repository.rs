//! File-backed profile snapshot repository.

use std::path::PathBuf;
use std::sync::Arc;

use locket_core::error::{LocketError, Result};
use locket_core::profile::{Profile, ProfileRepository};

use crate::paths::{LocketPaths, PathError};
use crate::storage::AtomicJsonFile;

/// Profile snapshot repository backed by an atomic JSON file.
///
/// The snapshot is the camelCase `Profile` object itself, so the cached
/// file holds the same shape the backend speaks.
pub struct JsonProfileRepository {
    file: Arc<AtomicJsonFile<Profile>>,
}

impl JsonProfileRepository {
    /// Creates a repository over the default path
    /// (`~/.config/locket/profile.json`).
    pub fn new() -> std::result::Result<Self, PathError> {
        Ok(Self::with_path(LocketPaths::profile_file()?))
    }

    /// Creates a repository over a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicJsonFile::new(path)),
        }
    }
}

#[async_trait::async_trait]
impl ProfileRepository for JsonProfileRepository {
    async fn load(&self) -> Result<Option<Profile>> {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || file.load())
            .await
            .map_err(|e| LocketError::internal(format!("Failed to join storage task: {}", e)))?
            .map_err(|e| LocketError::persistence(e.to_string()))
    }

    async fn save(&self, profile: &Profile) -> Result<()> {
        let file = self.file.clone();
        let profile = profile.clone();
        tokio::task::spawn_blocking(move || file.save(&profile))
            .await
            .map_err(|e| LocketError::internal(format!("Failed to join storage task: {}", e)))?
            .map_err(|e| LocketError::persistence(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use locket_core::profile::DEFAULT_PROFILE_PICTURE;

    use tempfile::TempDir;

    fn profile() -> Profile {
        Profile {
            name: "A".to_string(),
            email: "a@b.com".to_string(),
            phone: "555".to_string(),
            profile_picture: DEFAULT_PROFILE_PICTURE.to_string(),
            password: String::new(),
        }
    }

    #[tokio::test]
    async fn test_load_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let repository = JsonProfileRepository::with_path(temp_dir.path().join("profile.json"));

        assert_eq!(repository.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let repository = JsonProfileRepository::with_path(temp_dir.path().join("profile.json"));

        repository.save(&profile()).await.unwrap();

        assert_eq!(repository.load().await.unwrap(), Some(profile()));
    }

    #[tokio::test]
    async fn test_snapshot_is_camel_case_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("profile.json");
        let repository = JsonProfileRepository::with_path(path.clone());

        repository.save(&profile()).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("profilePicture"));
    }
}
