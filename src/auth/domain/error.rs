//! Error types for credential validation.

use thiserror::Error;

/// Errors returned while constructing authentication values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthDomainError {
    /// The email address is malformed.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The password is empty.
    #[error("password must not be empty")]
    EmptyPassword,

    /// A backend identifier or token is empty.
    #[error("{0} must not be empty")]
    EmptyValue(&'static str),
}
