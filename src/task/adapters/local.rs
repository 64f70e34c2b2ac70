//! Guest task storage in local key-value storage.

use crate::{
    storage::KeyValueStore,
    task::{
        domain::{PersistedTaskData, Task, TaskId, TaskText},
        ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, warn};

/// Storage key holding the guest task list when none is configured.
pub const GUEST_TASKS_KEY: &str = "guest_tasks";

/// Stored shape of one guest task: `{id, text, completed, createdAt}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredTask {
    id: TaskId,
    text: TaskText,
    completed: bool,
    created_at: DateTime<Utc>,
}

impl From<&Task> for StoredTask {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().clone(),
            text: task.text().clone(),
            completed: task.is_completed(),
            created_at: task.created_at(),
        }
    }
}

impl From<StoredTask> for Task {
    fn from(stored: StoredTask) -> Self {
        Self::from_persisted(PersistedTaskData {
            id: stored.id,
            text: stored.text,
            completed: stored.completed,
            created_at: stored.created_at,
        })
    }
}

/// Task repository for guest sessions.
///
/// The whole list is kept as one JSON array under a single key and rewritten
/// in full after every mutation. A stored value that cannot be parsed reads
/// as an empty list.
pub struct LocalTaskRepository<S: KeyValueStore> {
    store: Arc<S>,
    key: String,
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> LocalTaskRepository<S> {
    /// Creates a repository using [`GUEST_TASKS_KEY`].
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self::with_key(store, GUEST_TASKS_KEY)
    }

    /// Creates a repository using a custom storage key.
    #[must_use]
    pub fn with_key(store: Arc<S>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Reads the stored list.
    fn read_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        let Some(raw) = self
            .store
            .get(&self.key)
            .map_err(TaskRepositoryError::persistence)?
        else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<StoredTask>>(&raw) {
            Ok(stored) => Ok(stored.into_iter().map(Task::from).collect()),
            Err(err) => {
                warn!(key = %self.key, error = %err, "discarding unparseable guest tasks");
                Ok(Vec::new())
            }
        }
    }

    /// Overwrites the stored list with `tasks`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when serialisation or the
    /// storage write fails.
    pub fn save(&self, tasks: &[Task]) -> TaskRepositoryResult<()> {
        let stored: Vec<StoredTask> = tasks.iter().map(StoredTask::from).collect();
        let encoded = serde_json::to_string(&stored).map_err(TaskRepositoryError::persistence)?;
        self.store
            .set(&self.key, &encoded)
            .map_err(TaskRepositoryError::persistence)?;
        debug!(key = %self.key, count = tasks.len(), "saved guest tasks");
        Ok(())
    }

    /// Applies `change` to the stored list and saves the result.
    fn modify<T>(
        &self,
        change: impl FnOnce(&mut Vec<Task>) -> TaskRepositoryResult<T>,
    ) -> TaskRepositoryResult<T> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut tasks = self.read_all()?;
        let outcome = change(&mut tasks)?;
        self.save(&tasks)?;
        Ok(outcome)
    }
}

#[async_trait]
impl<S: KeyValueStore> TaskRepository for LocalTaskRepository<S> {
    async fn load(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.read_all()
    }

    async fn create(&self, task: Task) -> TaskRepositoryResult<Task> {
        self.modify(|tasks| {
            if tasks.iter().any(|existing| existing.id() == task.id()) {
                return Err(TaskRepositoryError::DuplicateTask(task.id().clone()));
            }
            tasks.insert(0, task.clone());
            Ok(task)
        })
    }

    async fn update(&self, id: &TaskId, completed: bool) -> TaskRepositoryResult<()> {
        self.modify(|tasks| {
            let task = tasks
                .iter_mut()
                .find(|task| task.id() == id)
                .ok_or_else(|| TaskRepositoryError::NotFound(id.clone()))?;
            task.set_completed(completed);
            Ok(())
        })
    }

    async fn remove(&self, id: &TaskId) -> TaskRepositoryResult<()> {
        self.modify(|tasks| {
            let position = tasks
                .iter()
                .position(|task| task.id() == id)
                .ok_or_else(|| TaskRepositoryError::NotFound(id.clone()))?;
            tasks.remove(position);
            Ok(())
        })
    }
}
