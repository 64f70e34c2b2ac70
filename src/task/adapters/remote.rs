//! Authenticated task storage in the hosted backend.

use crate::{
    auth::{domain::Session, ports::SessionProvider},
    backend::BackendError,
    task::{
        domain::{PersistedTaskData, Task, TaskId, TaskText},
        ports::{
            NewTaskRecord, TaskBackend, TaskRecord, TaskRepository, TaskRepositoryError,
            TaskRepositoryResult,
        },
    },
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Task repository for authenticated sessions.
///
/// Every call reads the current session first; without one the call fails
/// with [`TaskRepositoryError::Unauthenticated`] and nothing is sent.
#[derive(Clone)]
pub struct RemoteTaskRepository {
    backend: Arc<dyn TaskBackend>,
    sessions: Arc<dyn SessionProvider>,
}

impl RemoteTaskRepository {
    /// Creates a repository over `backend`, authenticated by `sessions`.
    #[must_use]
    pub fn new(backend: Arc<dyn TaskBackend>, sessions: Arc<dyn SessionProvider>) -> Self {
        Self { backend, sessions }
    }

    fn session(&self) -> TaskRepositoryResult<Session> {
        self.sessions
            .current_session()
            .ok_or(TaskRepositoryError::Unauthenticated)
    }
}

fn record_to_task(record: TaskRecord) -> Option<Task> {
    let (Ok(id), Ok(text)) = (TaskId::new(record.id), TaskText::new(&record.text)) else {
        return None;
    };
    Some(Task::from_persisted(PersistedTaskData {
        id,
        text,
        completed: record.completed,
        created_at: record.created_at,
    }))
}

#[async_trait]
impl TaskRepository for RemoteTaskRepository {
    async fn load(&self) -> TaskRepositoryResult<Vec<Task>> {
        let session = self.session()?;
        let records = self.backend.list_tasks(&session).await?;
        let total = records.len();
        let tasks: Vec<Task> = records.into_iter().filter_map(record_to_task).collect();
        if tasks.len() != total {
            warn!(
                skipped = total - tasks.len(),
                "ignored remote task rows with empty id or text"
            );
        }
        debug!(count = tasks.len(), "loaded remote tasks");
        Ok(tasks)
    }

    async fn create(&self, task: Task) -> TaskRepositoryResult<Task> {
        let session = self.session()?;
        let record = NewTaskRecord {
            text: task.text().as_str().to_owned(),
            completed: task.is_completed(),
            user_id: session.user_id().clone(),
        };
        let stored = self.backend.insert_task(&session, &record).await?;
        let stored_id = stored.id.clone();
        let created = record_to_task(stored).ok_or_else(|| {
            TaskRepositoryError::Backend(BackendError::Decode(format!(
                "inserted row '{stored_id}' has an empty id or text"
            )))
        })?;
        debug!(id = %created.id(), "created remote task");
        Ok(created)
    }

    async fn update(&self, id: &TaskId, completed: bool) -> TaskRepositoryResult<()> {
        let session = self.session()?;
        self.backend
            .update_task_completed(&session, id, completed)
            .await?;
        debug!(%id, completed, "updated remote task");
        Ok(())
    }

    async fn remove(&self, id: &TaskId) -> TaskRepositoryResult<()> {
        let session = self.session()?;
        self.backend.delete_task(&session, id).await?;
        debug!(%id, "removed remote task");
        Ok(())
    }
}
