//! Domain model for email/password authentication.

mod credentials;
mod error;
mod session;

pub use credentials::{Credentials, Email, Password};
pub use error::AuthDomainError;
pub use session::{AccessToken, AuthUser, Session, UserId};
