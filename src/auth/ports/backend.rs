//! Port for the hosted authentication service.

use crate::auth::domain::{AccessToken, AuthUser, Credentials, Session};
use crate::backend::BackendError;
use async_trait::async_trait;

/// Result of a sign-up request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// The account is active and a session was issued.
    SignedIn(Session),
    /// The account exists but the backend is waiting for email confirmation.
    ConfirmationPending(AuthUser),
}

/// Credential-based authentication contract.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Exchanges credentials for a session.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the credentials are rejected or the
    /// backend cannot be reached.
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, BackendError>;

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when registration is refused.
    async fn sign_up(&self, credentials: &Credentials) -> Result<SignUpOutcome, BackendError>;

    /// Revokes a session.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backend refuses the request.
    async fn sign_out(&self, session: &Session) -> Result<(), BackendError>;

    /// Resolves the user owning `token`; used to restore a persisted session.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the token is expired or unknown.
    async fn fetch_user(&self, token: &AccessToken) -> Result<AuthUser, BackendError>;
}
