//! Port for the hosted `tasks` table.

use crate::auth::domain::{Session, UserId};
use crate::backend::BackendError;
use crate::task::domain::TaskId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A row of the hosted `tasks` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    /// Backend-assigned identifier.
    pub id: String,
    /// Task text.
    pub text: String,
    /// Completion flag.
    pub completed: bool,
    /// Backend-assigned creation time.
    pub created_at: DateTime<Utc>,
}

/// Fields sent when inserting a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskRecord {
    /// Task text.
    pub text: String,
    /// Completion flag.
    pub completed: bool,
    /// Owner of the row.
    pub user_id: UserId,
}

/// Row operations on the hosted task table.
///
/// The backend's access policy limits every call to the rows owned by the
/// session's user.
#[async_trait]
pub trait TaskBackend: Send + Sync {
    /// Lists the user's rows ordered by creation time, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the query fails.
    async fn list_tasks(&self, session: &Session) -> Result<Vec<TaskRecord>, BackendError>;

    /// Inserts one row and returns it as stored.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the insert is rejected.
    async fn insert_task(
        &self,
        session: &Session,
        record: &NewTaskRecord,
    ) -> Result<TaskRecord, BackendError>;

    /// Sets `completed` on the row with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the update is rejected or matches no row.
    async fn update_task_completed(
        &self,
        session: &Session,
        id: &TaskId,
        completed: bool,
    ) -> Result<(), BackendError>;

    /// Deletes the row with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the delete is rejected or matches no row.
    async fn delete_task(&self, session: &Session, id: &TaskId) -> Result<(), BackendError>;
}
