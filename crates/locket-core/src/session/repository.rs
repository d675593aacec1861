//! Token repository trait.

use async_trait::async_trait;

use crate::error::Result;

/// Repository for the persisted session token.
///
/// Owned exclusively by the session store; no other component writes the
/// token.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Loads the persisted token, `None` if no session was ever saved.
    async fn load(&self) -> Result<Option<String>>;

    /// Persists the token, replacing any previous one.
    async fn save(&self, token: &str) -> Result<()>;

    /// Removes the persisted token. Succeeds when none exists.
    async fn clear(&self) -> Result<()>;
}
