//! Session state types.

use crate::user::User;

/// Authentication lifecycle status.
///
/// `Bootstrapping` is a distinct render state: consumers must not pick an
/// authenticated/unauthenticated branch until `bootstrap` has resolved it to
/// one of the other variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// Startup restore from persisted storage is still in flight
    #[default]
    Bootstrapping,
    /// No session; login or registration required
    Unauthenticated,
    /// A login or registration round trip is in flight
    Authenticating,
    /// A session token is held and the profile fetch succeeded
    Authenticated,
    /// The last auth operation failed; see `last_error`
    Error,
}

/// In-memory snapshot of the current session.
///
/// Invariants: `user.is_some()` implies `status == Authenticated`, and
/// `token.is_none()` implies `user.is_none()`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    /// Bearer credential; present means "possibly authenticated"
    pub token: Option<String>,
    /// Authenticated identity; `None` until a profile fetch succeeds
    pub user: Option<User>,
    pub status: SessionStatus,
    /// Normalized message of the last surfaced failure
    pub last_error: Option<String>,
}
