//! The hosted backend-as-a-service: authentication plus table storage.
//!
//! Both adapters implement [`AuthBackend`] and [`TaskBackend`]:
//!
//! - [`RestBackend`]: a Supabase-compatible REST API over HTTP
//! - [`InMemoryBackend`]: an in-process fake with the same access rules,
//!   used by tests and offline demos
//!
//! [`AuthBackend`]: crate::auth::ports::AuthBackend
//! [`TaskBackend`]: crate::task::ports::TaskBackend

mod error;
mod memory;
mod rest;

pub use error::BackendError;
pub use memory::InMemoryBackend;
pub use rest::RestBackend;
