//! Profile snapshot repository trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::profile::model::Profile;

/// Repository for the persisted profile snapshot.
///
/// Owned exclusively by the profile store; no other component writes the
/// snapshot.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Loads the last persisted snapshot, `None` if one was never saved.
    async fn load(&self) -> Result<Option<Profile>>;

    /// Persists the snapshot, replacing any previous one.
    async fn save(&self, profile: &Profile) -> Result<()>;
}
