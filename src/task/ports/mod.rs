//! Port contracts for task persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod backend;
pub mod repository;

pub use backend::{NewTaskRecord, TaskBackend, TaskRecord};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
