//! Task entity and session mode.

use super::{TaskId, TaskText};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// Where the current session keeps its tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionMode {
    /// No account: tasks live in local key-value storage only.
    Guest,
    /// Signed in: tasks live in the hosted backend's task table.
    Authenticated,
}

impl SessionMode {
    /// Returns `true` for guest sessions.
    #[must_use]
    pub const fn is_guest(self) -> bool {
        matches!(self, Self::Guest)
    }
}

/// A single entry in the user's task list.
///
/// `id` and `created_at` are fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    text: TaskText,
    completed: bool,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a stored task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Stored identifier.
    pub id: TaskId,
    /// Stored text.
    pub text: TaskText,
    /// Stored completion flag.
    pub completed: bool,
    /// Stored creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new, incomplete task with a locally generated identifier.
    #[must_use]
    pub fn new(text: TaskText, clock: &impl Clock) -> Self {
        Self {
            id: TaskId::generate(clock),
            text,
            completed: false,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a task from storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            text: data.text,
            completed: data.completed,
            created_at: data.created_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the task text.
    #[must_use]
    pub const fn text(&self) -> &TaskText {
        &self.text
    }

    /// Returns whether the task is done.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Sets the completion flag.
    pub const fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    /// Case-insensitive substring match against the task text.
    ///
    /// `needle` must already be lowercase.
    #[must_use]
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.text.as_str().to_lowercase().contains(needle)
    }
}
