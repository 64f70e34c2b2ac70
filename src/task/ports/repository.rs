//! Repository port for task persistence.

use crate::backend::BackendError;
use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// One implementation exists per session mode; callers never branch on the
/// mode themselves.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Returns the session's tasks, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError`] when the store cannot be read.
    async fn load(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Persists a freshly built task and returns its canonical form.
    ///
    /// The returned task may carry a different identifier and creation time
    /// when the store assigns its own.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError`] when the task could not be stored.
    async fn create(&self, task: Task) -> TaskRepositoryResult<Task>;

    /// Sets the completion flag of exactly one task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no task has `id`.
    async fn update(&self, id: &TaskId, completed: bool) -> TaskRepositoryResult<()>;

    /// Deletes exactly one task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no task has `id`.
    async fn remove(&self, id: &TaskId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// A remote operation was attempted without a session.
    #[error("User not authenticated")]
    Unauthenticated,

    /// The hosted backend reported a failure.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Local persistence failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
