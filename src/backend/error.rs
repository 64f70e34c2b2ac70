//! Error type shared by every hosted-backend call.

use thiserror::Error;

/// Structured failure reported by the hosted backend.
///
/// The `Display` output is the human-readable message shown to users.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The backend answered with an error payload.
    #[error("{message}")]
    Api {
        /// HTTP status, when the call went over HTTP.
        status: Option<u16>,
        /// Message extracted from the error payload.
        message: String,
    },

    /// The request never produced a response.
    #[error("network error: {0}")]
    Transport(String),

    /// The response could not be understood.
    #[error("unexpected backend response: {0}")]
    Decode(String),
}

impl BackendError {
    /// Creates an API error without an HTTP status.
    #[must_use]
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            status: None,
            message: message.into(),
        }
    }

    /// Returns the HTTP status carried by API errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}
