//! Session state container.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock, watch};
use tokio_util::sync::CancellationToken;

use crate::error::{LocketError, Result};
use crate::session::api::AuthApi;
use crate::session::model::{SessionState, SessionStatus};
use crate::session::repository::TokenRepository;
use crate::user::{LoginData, RegisterData, UpdateProfileData, User};

/// Single source of truth for "who is logged in".
///
/// `SessionStore` is responsible for:
/// - Restoring session state from persisted storage at startup
/// - Running the register/login/logout round trips
/// - Keeping the persisted token in sync with the in-memory session
/// - Publishing committed user changes to downstream consumers
///
/// Constructed once at process start and shared by `Arc`; all state
/// mutation happens under the internal lock, so concurrent operations stay
/// race-free. Repeated `register` calls supersede each other: the older
/// call's network request is aborted and its continuation skips all state
/// mutation, resolving as a silent no-op.
pub struct SessionStore {
    /// Backend the auth round trips run against
    api: Arc<dyn AuthApi>,
    /// Persistent storage backend for the session token
    tokens: Arc<dyn TokenRepository>,
    state: RwLock<SessionState>,
    /// Publishes the committed user on every change; the profile store
    /// reconciles off this channel
    user_tx: watch::Sender<Option<User>>,
    /// Cancellation handle of the in-flight register call, if any
    register_guard: Mutex<Option<CancellationToken>>,
}

/// The two authentication round trips share one code path; only the
/// endpoint differs.
enum AuthRequest {
    Register(RegisterData),
    Login(LoginData),
}

impl SessionStore {
    /// Creates a new `SessionStore` in the `Bootstrapping` state.
    ///
    /// # Arguments
    ///
    /// * `api` - The backend the auth operations run against
    /// * `tokens` - The repository backend for token persistence
    pub fn new(api: Arc<dyn AuthApi>, tokens: Arc<dyn TokenRepository>) -> Self {
        let (user_tx, _) = watch::channel(None);
        Self {
            api,
            tokens,
            state: RwLock::new(SessionState::default()),
            user_tx,
            register_guard: Mutex::new(None),
        }
    }

    /// Returns a cloned snapshot of the current session state.
    pub async fn state(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// Returns the current lifecycle status.
    pub async fn status(&self) -> SessionStatus {
        self.state.read().await.status
    }

    /// Returns the authenticated identity, `None` while unauthenticated.
    pub async fn user(&self) -> Option<User> {
        self.state.read().await.user.clone()
    }

    /// Returns the normalized message of the last surfaced failure.
    pub async fn last_error(&self) -> Option<String> {
        self.state.read().await.last_error.clone()
    }

    /// Subscribes to committed user changes.
    ///
    /// The receiver always holds the committed value; a notification is
    /// only sent once the corresponding state update is in place, so
    /// subscribers never observe a torn session.
    pub fn subscribe_user(&self) -> watch::Receiver<Option<User>> {
        self.user_tx.subscribe()
    }

    /// Restores session state from persisted storage.
    ///
    /// Invoked once at process start. Resolves `status` to `Authenticated`
    /// (stored token present and the profile fetch succeeded) or
    /// `Unauthenticated` (no token, or the fetch failed); never fails.
    /// A token whose profile fetch failed stays in storage untouched.
    pub async fn bootstrap(&self) {
        let token = match self.tokens.load().await {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!("Failed to read persisted token: {}", err);
                None
            }
        };

        let Some(token) = token else {
            self.commit(|state| {
                state.token = None;
                state.user = None;
                state.status = SessionStatus::Unauthenticated;
            })
            .await;
            return;
        };

        match self.api.fetch_profile(&token).await {
            Ok(user) => {
                self.commit(move |state| {
                    state.token = Some(token);
                    state.user = Some(user);
                    state.status = SessionStatus::Authenticated;
                    state.last_error = None;
                })
                .await;
            }
            Err(err) => {
                tracing::warn!("Failed to restore session: {}", err);
                self.commit(move |state| {
                    state.token = Some(token);
                    state.user = None;
                    state.status = SessionStatus::Unauthenticated;
                })
                .await;
            }
        }
    }

    /// Registers a new account and establishes a session.
    ///
    /// Supersedes any still-outstanding prior `register` call: the earlier
    /// call's request is aborted and its result discarded, not surfaced as
    /// an error. On success the returned token is persisted and the
    /// canonical profile fetched; on failure `status` becomes `Error`,
    /// `last_error` is set and the error is re-raised.
    pub async fn register(&self, data: RegisterData) -> Result<()> {
        let cancel = {
            let mut guard = self.register_guard.lock().await;
            if let Some(previous) = guard.take() {
                tracing::debug!("Superseding in-flight register request");
                previous.cancel();
            }
            let token = CancellationToken::new();
            *guard = Some(token.clone());
            token
        };

        self.authenticate(AuthRequest::Register(data), Some(cancel))
            .await
    }

    /// Authenticates existing credentials and establishes a session.
    pub async fn login(&self, data: LoginData) -> Result<()> {
        self.authenticate(AuthRequest::Login(data), None).await
    }

    /// Ends the session.
    ///
    /// The server round trip is best-effort: a failure is logged, never
    /// surfaced. The persisted token and in-memory user are cleared
    /// unconditionally, so logout is always effective locally.
    pub async fn logout(&self) {
        let token = self.state.read().await.token.clone();
        if let Some(token) = token {
            if let Err(err) = self.api.logout(&token).await {
                tracing::warn!("Logout request failed: {}", err);
            }
        }

        if let Err(err) = self.tokens.clear().await {
            tracing::warn!("Failed to clear persisted token: {}", err);
        }

        self.commit(|state| {
            state.token = None;
            state.user = None;
            state.status = SessionStatus::Unauthenticated;
            state.last_error = None;
        })
        .await;
    }

    /// Pushes a partial profile update to the backend.
    ///
    /// On success the canonical profile is re-fetched and committed as the
    /// session user; on failure `last_error` is set and the error
    /// re-raised, leaving `status` untouched.
    pub async fn update_user_profile(&self, data: UpdateProfileData) -> Result<()> {
        let token = self.state.read().await.token.clone();
        let Some(token) = token else {
            return self.report(LocketError::NotAuthenticated).await;
        };

        if let Err(err) = self.api.update_profile(&token, &data).await {
            return self.report(err).await;
        }

        match self.api.fetch_profile(&token).await {
            Ok(user) => {
                self.commit(move |state| {
                    state.user = Some(user);
                    state.status = SessionStatus::Authenticated;
                    state.last_error = None;
                })
                .await;
                Ok(())
            }
            Err(err) => self.report(err).await,
        }
    }

    /// Shared register/login path.
    ///
    /// With a cancellation token present, every suspension point is
    /// followed by a supersession check: a superseded continuation must
    /// not clobber newer state, so it returns `Ok(())` without mutating
    /// anything.
    async fn authenticate(
        &self,
        request: AuthRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<()> {
        self.commit(|state| {
            state.status = SessionStatus::Authenticating;
        })
        .await;

        let send = async {
            match &request {
                AuthRequest::Register(data) => self.api.signup(data).await,
                AuthRequest::Login(data) => self.api.login(data).await,
            }
        };
        let response = match cancel {
            Some(ref token) => tokio::select! {
                _ = token.cancelled() => return Ok(()),
                response = send => response,
            },
            None => send.await,
        };
        if Self::superseded(&cancel) {
            return Ok(());
        }

        let response = match response {
            Ok(response) => response,
            Err(err) => return self.fail(err).await,
        };

        if let Err(err) = self.tokens.save(&response.token).await {
            if Self::superseded(&cancel) {
                return Ok(());
            }
            return self.fail(err).await;
        }
        if Self::superseded(&cancel) {
            return Ok(());
        }

        let user = match self.api.fetch_profile(&response.token).await {
            Ok(user) => user,
            Err(err) => {
                if Self::superseded(&cancel) {
                    return Ok(());
                }
                return self.fail(err).await;
            }
        };
        if Self::superseded(&cancel) {
            return Ok(());
        }

        self.commit(move |state| {
            state.token = Some(response.token);
            state.user = Some(user);
            state.status = SessionStatus::Authenticated;
            state.last_error = None;
        })
        .await;
        Ok(())
    }

    fn superseded(cancel: &Option<CancellationToken>) -> bool {
        cancel.as_ref().is_some_and(|token| token.is_cancelled())
    }

    /// Marks the in-flight operation failed and re-raises.
    async fn fail(&self, err: LocketError) -> Result<()> {
        let message = err.to_string();
        self.commit(move |state| {
            state.status = SessionStatus::Error;
            state.last_error = Some(message);
        })
        .await;
        Err(err)
    }

    /// Records a surfaced failure without touching `status`.
    async fn report(&self, err: LocketError) -> Result<()> {
        let message = err.to_string();
        self.commit(move |state| {
            state.last_error = Some(message);
        })
        .await;
        Err(err)
    }

    /// Applies a state update and publishes the committed user.
    ///
    /// The watch channel is written while the state lock is held, so a
    /// notification can never race past the commit it belongs to.
    async fn commit<F>(&self, f: F)
    where
        F: FnOnce(&mut SessionState),
    {
        let mut state = self.state.write().await;
        f(&mut state);
        let user = state.user.clone();
        self.user_tx.send_if_modified(|current| {
            if *current != user {
                *current = user;
                true
            } else {
                false
            }
        });
    }
}
