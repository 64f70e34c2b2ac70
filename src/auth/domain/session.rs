//! Authenticated users and backend-issued sessions.

use super::{AuthDomainError, Email};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend-issued user identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a user identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AuthDomainError::EmptyValue`] for a blank identifier.
    pub fn new(value: impl Into<String>) -> Result<Self, AuthDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(AuthDomainError::EmptyValue("user id"));
        }
        Ok(Self(raw))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Bearer token proving an authenticated session. Never printed.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a backend-issued token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthDomainError::EmptyValue`] for a blank token.
    pub fn new(value: impl Into<String>) -> Result<Self, AuthDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(AuthDomainError::EmptyValue("access token"));
        }
        Ok(Self(raw))
    }

    /// Exposes the token for request headers and persistence.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// The account behind a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    id: UserId,
    email: Option<Email>,
}

impl AuthUser {
    /// Creates a user record.
    #[must_use]
    pub const fn new(id: UserId, email: Option<Email>) -> Self {
        Self { id, email }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the user's email, when the backend disclosed it.
    #[must_use]
    pub const fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }
}

/// An authenticated session: who is signed in and the token proving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user: AuthUser,
    access_token: AccessToken,
}

impl Session {
    /// Creates a session.
    #[must_use]
    pub const fn new(user: AuthUser, access_token: AccessToken) -> Self {
        Self { user, access_token }
    }

    /// Returns the signed-in user.
    #[must_use]
    pub const fn user(&self) -> &AuthUser {
        &self.user
    }

    /// Returns the signed-in user's identifier.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        self.user.id()
    }

    /// Returns the bearer token.
    #[must_use]
    pub const fn access_token(&self) -> &AccessToken {
        &self.access_token
    }
}
