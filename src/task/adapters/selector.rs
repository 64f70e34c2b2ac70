//! Chooses the task repository for a session mode.

use crate::task::{domain::SessionMode, ports::TaskRepository};
use std::sync::Arc;

/// The repository pair available to a task list, one per session mode.
///
/// This is the only place where the session mode decides how tasks are
/// stored.
#[derive(Clone)]
pub struct SessionRepositories {
    guest: Arc<dyn TaskRepository>,
    authenticated: Arc<dyn TaskRepository>,
}

impl SessionRepositories {
    /// Pairs the guest and authenticated repositories.
    #[must_use]
    pub fn new(guest: Arc<dyn TaskRepository>, authenticated: Arc<dyn TaskRepository>) -> Self {
        Self {
            guest,
            authenticated,
        }
    }

    /// Returns the repository backing `mode`.
    #[must_use]
    pub fn for_mode(&self, mode: SessionMode) -> Arc<dyn TaskRepository> {
        match mode {
            SessionMode::Guest => Arc::clone(&self.guest),
            SessionMode::Authenticated => Arc::clone(&self.authenticated),
        }
    }
}
