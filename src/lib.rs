//! Tasklist: a per-user task list with guest and signed-in modes.
//!
//! Guests keep their tasks in local key-value storage; signed-in users keep
//! them in a hosted backend-as-a-service that also handles email/password
//! authentication.
//!
//! # Architecture
//!
//! Tasklist follows hexagonal architecture principles:
//!
//! - **Domain**: Plain task and credential types with no infrastructure
//!   dependencies
//! - **Ports**: Abstract trait interfaces for storage, the hosted backend and
//!   user notifications
//! - **Adapters**: Concrete implementations of ports (local storage, REST,
//!   in-memory fakes)
//!
//! # Modules
//!
//! - [`task`]: Task entity, dual-mode repositories, actions and list controller
//! - [`auth`]: Credentials, sessions and sign-in/sign-up/sign-out
//! - [`backend`]: Hosted backend clients
//! - [`storage`]: Local key-value storage
//! - [`notification`]: User-facing failure and status messages
//! - [`config`]: TOML configuration
//! - [`app`]: Session-level composition of all of the above

pub mod app;
pub mod auth;
pub mod backend;
pub mod config;
pub mod notification;
pub mod storage;
pub mod task;
