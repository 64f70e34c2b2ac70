//! Application services for authentication.

mod session;

pub use session::{AuthError, AuthResult, AuthService, DEFAULT_SESSION_KEY};
