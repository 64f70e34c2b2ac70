//! In-memory task list and the user intents that change it.

use crate::{
    notification::{Notification, Notifier},
    task::{
        domain::{Task, TaskId, TaskText},
        ports::TaskRepository,
    },
};
use mockable::Clock;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

#[derive(Debug, Default)]
struct TaskMirror {
    tasks: Vec<Task>,
    adding: bool,
}

/// Clears the in-flight add flag when the add attempt ends, however it ends.
struct AddingGuard<'a> {
    mirror: &'a Mutex<TaskMirror>,
}

impl Drop for AddingGuard<'_> {
    fn drop(&mut self) {
        self.mirror
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .adding = false;
    }
}

/// Owns the session's task list and applies user intents to it.
///
/// The in-memory list only changes after the repository confirms a write,
/// so a failed remote call never leaves a task that the backend does not
/// have. Failures are reported through the notifier and never propagate.
pub struct TaskActionService<C>
where
    C: Clock + Send + Sync,
{
    repository: Arc<dyn TaskRepository>,
    clock: Arc<C>,
    notifier: Arc<dyn Notifier>,
    mirror: Mutex<TaskMirror>,
}

impl<C> TaskActionService<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a service with an empty task list.
    #[must_use]
    pub fn new(
        repository: Arc<dyn TaskRepository>,
        clock: Arc<C>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            repository,
            clock,
            notifier,
            mirror: Mutex::new(TaskMirror::default()),
        }
    }

    fn mirror(&self) -> MutexGuard<'_, TaskMirror> {
        self.mirror.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin_adding(&self) -> Option<AddingGuard<'_>> {
        let mut mirror = self.mirror();
        if mirror.adding {
            return None;
        }
        mirror.adding = true;
        Some(AddingGuard {
            mirror: &self.mirror,
        })
    }

    /// Returns a snapshot of the current task list.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.mirror().tasks.clone()
    }

    /// Returns the task with `id`, if present.
    #[must_use]
    pub fn find(&self, id: &TaskId) -> Option<Task> {
        self.mirror().tasks.iter().find(|task| task.id() == id).cloned()
    }

    /// Returns `true` while an add is in flight.
    #[must_use]
    pub fn is_adding(&self) -> bool {
        self.mirror().adding
    }

    /// Replaces the task list wholesale.
    pub fn replace_tasks(&self, tasks: Vec<Task>) {
        self.mirror().tasks = tasks;
    }

    /// Loads the task list from the repository, replacing the current one.
    ///
    /// On failure the user is notified and the list becomes empty. Returns
    /// the number of tasks loaded.
    pub async fn load(&self) -> usize {
        let tasks = match self.repository.load().await {
            Ok(tasks) => tasks,
            Err(err) => {
                self.notifier
                    .notify(Notification::error("Error loading tasks", &err));
                Vec::new()
            }
        };
        let count = tasks.len();
        self.replace_tasks(tasks);
        debug!(count, "task list loaded");
        count
    }

    /// Adds a task with the given text to the top of the list.
    ///
    /// Returns `false` without touching the repository when the text is
    /// blank or another add is still in flight. Returns `false` after
    /// notifying the user when the repository rejects the task.
    pub async fn add_task(&self, text: &str) -> bool {
        let Ok(task_text) = TaskText::new(text) else {
            return false;
        };
        let Some(_adding) = self.begin_adding() else {
            debug!("add ignored while another add is in flight");
            return false;
        };

        let draft = Task::new(task_text, &*self.clock);
        match self.repository.create(draft).await {
            Ok(task) => {
                let mut mirror = self.mirror();
                mirror.tasks.retain(|existing| existing.id() != task.id());
                mirror.tasks.insert(0, task);
                true
            }
            Err(err) => {
                self.notifier
                    .notify(Notification::error("Error adding task", &err));
                false
            }
        }
    }

    /// Flips the completion flag of the task with `id`.
    ///
    /// Returns `false` when no such task exists or the repository rejects
    /// the change; the list is left as it was in both cases.
    pub async fn toggle_task(&self, id: &TaskId) -> bool {
        let Some(current) = self.find(id) else {
            return false;
        };
        let completed = !current.is_completed();

        match self.repository.update(id, completed).await {
            Ok(()) => {
                if let Some(task) = self.mirror().tasks.iter_mut().find(|task| task.id() == id) {
                    task.set_completed(completed);
                }
                true
            }
            Err(err) => {
                self.notifier
                    .notify(Notification::error("Error updating task", &err));
                false
            }
        }
    }

    /// Removes the task with `id`.
    ///
    /// Returns `false` when no such task exists or the repository rejects
    /// the delete; the list is left as it was in both cases.
    pub async fn delete_task(&self, id: &TaskId) -> bool {
        if self.find(id).is_none() {
            return false;
        }

        match self.repository.remove(id).await {
            Ok(()) => {
                self.mirror().tasks.retain(|task| task.id() != id);
                true
            }
            Err(err) => {
                self.notifier
                    .notify(Notification::error("Error deleting task", &err));
                false
            }
        }
    }
}
