//! Session ownership: sign-in, sign-up, sign-out and restoration.

use crate::{
    auth::{
        domain::{AccessToken, AuthDomainError, Credentials, Session},
        ports::{AuthBackend, SessionProvider, SignUpOutcome},
    },
    backend::BackendError,
    notification::{Notification, Notifier},
    storage::{KeyValueStore, StorageError},
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Storage key used for the persisted access token when none is configured.
pub const DEFAULT_SESSION_KEY: &str = "tasklist_session";

/// Errors returned by [`AuthService`].
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Form input failed validation.
    #[error(transparent)]
    Domain(#[from] AuthDomainError),

    /// The backend rejected the request.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// The session token could not be persisted.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for authentication service operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Owns the current authenticated session.
///
/// Restoration across restarts uses the backend-issued access token only:
/// the token is persisted on sign-in and re-validated with the backend on
/// [`AuthService::restore`].
pub struct AuthService<B, S>
where
    B: AuthBackend,
    S: KeyValueStore,
{
    backend: Arc<B>,
    store: Arc<S>,
    notifier: Arc<dyn Notifier>,
    session_key: String,
    current: Mutex<Option<Session>>,
}

impl<B, S> AuthService<B, S>
where
    B: AuthBackend,
    S: KeyValueStore,
{
    /// Creates a signed-out service persisting tokens under
    /// [`DEFAULT_SESSION_KEY`].
    #[must_use]
    pub fn new(backend: Arc<B>, store: Arc<S>, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_session_key(backend, store, notifier, DEFAULT_SESSION_KEY)
    }

    /// Creates a signed-out service persisting tokens under `session_key`.
    #[must_use]
    pub fn with_session_key(
        backend: Arc<B>,
        store: Arc<S>,
        notifier: Arc<dyn Notifier>,
        session_key: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            store,
            notifier,
            session_key: session_key.into(),
            current: Mutex::new(None),
        }
    }

    fn current(&self) -> MutexGuard<'_, Option<Session>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn establish(&self, session: Session) -> Session {
        if let Err(err) = self
            .store
            .set(&self.session_key, session.access_token().expose())
        {
            warn!(error = %err, "failed to persist session token");
        }
        info!(user_id = %session.user_id(), "session established");
        *self.current() = Some(session.clone());
        session
    }

    fn forget_token(&self) {
        if let Err(err) = self.store.remove(&self.session_key) {
            warn!(error = %err, "failed to remove persisted session token");
        }
    }

    fn fail<T>(&self, title: &str, err: impl Into<AuthError>) -> AuthResult<T> {
        let error: AuthError = err.into();
        self.notifier.notify(Notification::error(title, &error));
        Err(error)
    }

    /// Restores the session persisted by a previous sign-in.
    ///
    /// Returns `None` when no token is stored or the backend no longer
    /// accepts it; a rejected token is deleted.
    pub async fn restore(&self) -> Option<Session> {
        let stored = match self.store.get(&self.session_key) {
            Ok(stored) => stored?,
            Err(err) => {
                warn!(error = %err, "failed to read persisted session token");
                return None;
            }
        };
        let Ok(token) = AccessToken::new(stored) else {
            self.forget_token();
            return None;
        };

        match self.backend.fetch_user(&token).await {
            Ok(user) => Some(self.establish(Session::new(user, token))),
            Err(err) => {
                debug!(error = %err, "persisted session rejected by backend");
                self.forget_token();
                None
            }
        }
    }

    /// Signs in with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] after notifying the user when the input is
    /// invalid or the backend rejects it. The previous session is kept.
    pub async fn sign_in(&self, email: &str, password: &str) -> AuthResult<Session> {
        const TITLE: &str = "Sign in failed";
        let credentials = match Credentials::new(email, password) {
            Ok(credentials) => credentials,
            Err(err) => return self.fail(TITLE, err),
        };
        match self.backend.sign_in(&credentials).await {
            Ok(session) => Ok(self.establish(session)),
            Err(err) => self.fail(TITLE, err),
        }
    }

    /// Registers a new account.
    ///
    /// The user is signed in only when the backend issues a session right
    /// away; while confirmation is pending an informational notification is
    /// sent and the service stays signed out.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] after notifying the user when the input is
    /// invalid or the backend refuses the registration.
    pub async fn sign_up(&self, email: &str, password: &str) -> AuthResult<SignUpOutcome> {
        const TITLE: &str = "Sign up failed";
        let credentials = match Credentials::new(email, password) {
            Ok(credentials) => credentials,
            Err(err) => return self.fail(TITLE, err),
        };
        match self.backend.sign_up(&credentials).await {
            Ok(SignUpOutcome::SignedIn(session)) => {
                Ok(SignUpOutcome::SignedIn(self.establish(session)))
            }
            Ok(SignUpOutcome::ConfirmationPending(user)) => {
                info!(user_id = %user.id(), "sign-up awaiting email confirmation");
                self.notifier.notify(Notification::info(
                    "Check your email",
                    format!(
                        "A confirmation link was sent to {}.",
                        credentials.email()
                    ),
                ));
                Ok(SignUpOutcome::ConfirmationPending(user))
            }
            Err(err) => self.fail(TITLE, err),
        }
    }

    /// Signs out.
    ///
    /// The local session and persisted token are cleared even when the
    /// backend fails to revoke the session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Backend`] after notifying the user when the
    /// backend revocation fails.
    pub async fn sign_out(&self) -> AuthResult<()> {
        let previous = self.current().take();
        let Some(session) = previous else {
            self.forget_token();
            return Ok(());
        };
        self.forget_token();
        info!(user_id = %session.user_id(), "session ended");
        match self.backend.sign_out(&session).await {
            Ok(()) => Ok(()),
            Err(err) => self.fail("Sign out failed", err),
        }
    }

    /// Returns `true` while a session is active.
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.current().is_some()
    }
}

impl<B, S> SessionProvider for AuthService<B, S>
where
    B: AuthBackend,
    S: KeyValueStore,
{
    fn current_session(&self) -> Option<Session> {
        self.current().clone()
    }
}
