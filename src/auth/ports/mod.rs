//! Port contracts for authentication.

pub mod backend;

pub use backend::{AuthBackend, SignUpOutcome};

use crate::auth::domain::Session;

/// Source of the current authenticated session.
///
/// Remote task storage asks for the session on every call, so a sign-out is
/// observed immediately.
pub trait SessionProvider: Send + Sync {
    /// Returns the active session, if any.
    fn current_session(&self) -> Option<Session>;
}
