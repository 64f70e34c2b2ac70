//! Email/password authentication against the hosted backend.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Session orchestration in [`services`]
//!
//! The in-memory and REST implementations of [`ports::AuthBackend`] live in
//! [`crate::backend`], next to the task table implementations they share a
//! backend with.

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
