//! Backend capability trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::user::{AuthResponse, LoginData, RegisterData, UpdateProfileData, User};

/// The slice of the REST backend the session layer consumes.
///
/// Implementations normalize every transport/server failure into a single
/// human-readable `LocketError` before returning it; the stores never see a
/// raw transport error.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /signup`: registers a new account.
    async fn signup(&self, data: &RegisterData) -> Result<AuthResponse>;

    /// `POST /login`: authenticates existing credentials.
    async fn login(&self, data: &LoginData) -> Result<AuthResponse>;

    /// `GET /profile`: fetches the canonical identity for `token`.
    async fn fetch_profile(&self, token: &str) -> Result<User>;

    /// `PUT /profile`: applies a partial update, returning the updated
    /// identity as the server sees it.
    async fn update_profile(&self, token: &str, data: &UpdateProfileData) -> Result<User>;

    /// `POST /logout`: invalidates `token` server-side.
    async fn logout(&self, token: &str) -> Result<()>;
}
