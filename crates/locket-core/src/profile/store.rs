//! Profile state container.

use std::sync::Arc;

use tokio::sync::{RwLock, watch};

use crate::error::Result;
use crate::profile::model::{Profile, ProfileStatus};
use crate::profile::repository::ProfileRepository;
use crate::user::{UpdateProfileData, User};

struct ProfileState {
    profile: Option<Profile>,
    status: ProfileStatus,
}

/// Editable, persisted snapshot of the user's profile, reconciled against
/// the session store's authenticated user.
///
/// While a user is authenticated the profile is derived from the session
/// and the derived snapshot written through to storage; without one, the
/// last persisted snapshot serves as the local fallback. Local edits via
/// [`update_profile`](ProfileStore::update_profile) never leave the device;
/// the server round trip for profile edits is the session store's
/// `update_user_profile`.
pub struct ProfileStore {
    /// Persistent storage backend for the snapshot
    repository: Arc<dyn ProfileRepository>,
    /// Committed session user, published by the session store
    session_user: watch::Receiver<Option<User>>,
    state: RwLock<ProfileState>,
}

impl ProfileStore {
    /// Creates a new `ProfileStore` in the `Loading` state.
    ///
    /// # Arguments
    ///
    /// * `repository` - The repository backend for snapshot persistence
    /// * `session_user` - Receiver from `SessionStore::subscribe_user`
    pub fn new(
        repository: Arc<dyn ProfileRepository>,
        session_user: watch::Receiver<Option<User>>,
    ) -> Self {
        Self {
            repository,
            session_user,
            state: RwLock::new(ProfileState {
                profile: None,
                status: ProfileStatus::Loading,
            }),
        }
    }

    /// Returns the current profile, `None` when nothing was ever persisted
    /// and no user is authenticated.
    pub async fn profile(&self) -> Option<Profile> {
        self.state.read().await.profile.clone()
    }

    /// Returns the store lifecycle status.
    pub async fn status(&self) -> ProfileStatus {
        self.state.read().await.status
    }

    /// Rebuilds the profile from the committed session user.
    ///
    /// With an authenticated user the profile is derived from it (field
    /// defaults applied, password emptied) and written through to storage;
    /// a write failure is logged, not surfaced. Without one the last
    /// persisted snapshot is loaded, `None` if there is none. Idempotent
    /// while the session user is unchanged.
    pub async fn refresh_profile(&self) {
        let user = self.session_user.borrow().clone();

        let profile = match user {
            Some(user) => {
                let profile = Profile::from_user(&user);
                if let Err(err) = self.repository.save(&profile).await {
                    tracing::warn!("Failed to persist profile snapshot: {}", err);
                }
                Some(profile)
            }
            None => match self.repository.load().await {
                Ok(stored) => stored.map(|mut profile| {
                    // password is write-only; never restore it from disk
                    profile.password = String::new();
                    profile
                }),
                Err(err) => {
                    tracing::warn!("Failed to load stored profile: {}", err);
                    None
                }
            },
        };

        let mut state = self.state.write().await;
        state.profile = profile;
        state.status = ProfileStatus::Ready;
    }

    /// Merges a partial edit into the current profile (or a fresh default
    /// when none exists) and persists the result.
    ///
    /// The in-memory profile is updated first; a storage failure is logged
    /// and surfaced as a `Persistence` error without reverting the
    /// in-memory update, so the UI stays responsive under storage failure.
    pub async fn update_profile(&self, update: UpdateProfileData) -> Result<()> {
        let merged = {
            let mut state = self.state.write().await;
            let mut profile = state.profile.clone().unwrap_or_default();
            profile.apply(update);
            state.profile = Some(profile.clone());
            state.status = ProfileStatus::Ready;
            profile
        };

        if let Err(err) = self.repository.save(&merged).await {
            tracing::warn!("Failed to persist profile update: {}", err);
            return Err(err);
        }
        Ok(())
    }

    /// Reconciliation loop: one initial refresh, then one per committed
    /// session-user change.
    ///
    /// Spawned by the embedding application; returns when the session
    /// store is dropped.
    pub async fn run(&self) {
        let mut changes = self.session_user.clone();
        self.refresh_profile().await;
        while changes.changed().await.is_ok() {
            self.refresh_profile().await;
        }
    }
}
