//! Repository adapters for the task list.
//!
//! - [`LocalTaskRepository`]: guest sessions, backed by local key-value
//!   storage
//! - [`RemoteTaskRepository`]: authenticated sessions, backed by the hosted
//!   task table
//! - [`SessionRepositories`]: picks one of the two for a session mode

mod local;
mod remote;
mod selector;

pub use local::{GUEST_TASKS_KEY, LocalTaskRepository};
pub use remote::RemoteTaskRepository;
pub use selector::SessionRepositories;
