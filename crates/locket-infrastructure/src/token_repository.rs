//! File-backed session token repository.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use locket_core::error::{LocketError, Result};
use locket_core::session::TokenRepository;

use crate::paths::{LocketPaths, PathError};
use crate::storage::AtomicJsonFile;

/// Persisted shape of `session.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredSession {
    token: String,
}

/// Token repository backed by an atomic JSON file.
///
/// Blocking file I/O runs on the blocking pool so async callers are never
/// stalled (the session store awaits these calls on its hot path).
pub struct JsonTokenRepository {
    file: Arc<AtomicJsonFile<StoredSession>>,
}

impl JsonTokenRepository {
    /// Creates a repository over the default path
    /// (`~/.config/locket/session.json`).
    pub fn new() -> std::result::Result<Self, PathError> {
        Ok(Self::with_path(LocketPaths::session_file()?))
    }

    /// Creates a repository over a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicJsonFile::new(path)),
        }
    }
}

#[async_trait::async_trait]
impl TokenRepository for JsonTokenRepository {
    async fn load(&self) -> Result<Option<String>> {
        let file = self.file.clone();
        let stored = tokio::task::spawn_blocking(move || file.load())
            .await
            .map_err(|e| LocketError::internal(format!("Failed to join storage task: {}", e)))?
            .map_err(|e| LocketError::persistence(e.to_string()))?;
        Ok(stored.map(|session| session.token))
    }

    async fn save(&self, token: &str) -> Result<()> {
        let file = self.file.clone();
        let stored = StoredSession {
            token: token.to_string(),
        };
        tokio::task::spawn_blocking(move || file.save(&stored))
            .await
            .map_err(|e| LocketError::internal(format!("Failed to join storage task: {}", e)))?
            .map_err(|e| LocketError::persistence(e.to_string()))
    }

    async fn clear(&self) -> Result<()> {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || file.remove())
            .await
            .map_err(|e| LocketError::internal(format!("Failed to join storage task: {}", e)))?
            .map_err(|e| LocketError::persistence(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let repository = JsonTokenRepository::with_path(temp_dir.path().join("session.json"));

        assert_eq!(repository.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let repository = JsonTokenRepository::with_path(temp_dir.path().join("session.json"));

        repository.save("t1").await.unwrap();

        assert_eq!(repository.load().await.unwrap(), Some("t1".to_string()));
    }

    #[tokio::test]
    async fn test_clear() {
        let temp_dir = TempDir::new().unwrap();
        let repository = JsonTokenRepository::with_path(temp_dir.path().join("session.json"));

        repository.save("t1").await.unwrap();
        repository.clear().await.unwrap();

        assert_eq!(repository.load().await.unwrap(), None);
        // clearing an absent token is not an error
        repository.clear().await.unwrap();
    }
}
