//! Domain model for the task list.
//!
//! Tasks are plain records; all persistence concerns stay behind the
//! repository port.

mod error;
mod ids;
mod task;

pub use error::TaskDomainError;
pub use ids::{TaskId, TaskText};
pub use task::{PersistedTaskData, SessionMode, Task};
