//! Per-user task list with guest and authenticated storage.
//!
//! Guest sessions keep their tasks in local key-value storage; authenticated
//! sessions keep them in the hosted backend's task table. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
