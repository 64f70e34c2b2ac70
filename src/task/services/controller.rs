//! Session-level task list orchestration and its view model.

use super::TaskActionService;
use crate::{
    notification::Notifier,
    task::{
        adapters::SessionRepositories,
        domain::{SessionMode, Task, TaskId},
    },
};
use mockable::Clock;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use tracing::info;

/// Returns the tasks whose text contains `search_term`, ignoring case.
///
/// A blank search term returns every task. Order is preserved.
#[must_use]
pub fn filter_tasks(tasks: &[Task], search_term: &str) -> Vec<Task> {
    let term = search_term.trim();
    if term.is_empty() {
        return tasks.to_vec();
    }
    let needle = term.to_lowercase();
    tasks
        .iter()
        .filter(|task| task.matches_lowercase(&needle))
        .cloned()
        .collect()
}

/// Everything a presentation layer needs to render the task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListView {
    /// Session mode the list belongs to.
    pub mode: SessionMode,
    /// Tasks matching the current search, newest first.
    pub tasks: Vec<Task>,
    /// Number of tasks before filtering.
    pub total_count: usize,
    /// A load is in flight.
    pub is_loading: bool,
    /// An add is in flight; the add controls should be disabled.
    pub is_adding_task: bool,
    /// The add form is open.
    pub is_add_form_open: bool,
    /// A non-blank search term is active.
    pub is_searching: bool,
    /// Nothing to list and the add form is closed.
    pub show_empty_state: bool,
}

struct LoadingGuard<'a>(&'a AtomicBool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Drives one task list for the lifetime of a session.
///
/// The controller owns the [`TaskActionService`] for the active mode and
/// replaces it (discarding its list) whenever the mode changes.
pub struct TaskListController<C>
where
    C: Clock + Send + Sync,
{
    repositories: SessionRepositories,
    clock: Arc<C>,
    notifier: Arc<dyn Notifier>,
    mode: SessionMode,
    actions: Arc<TaskActionService<C>>,
    loading: AtomicBool,
    search_term: String,
    add_form_open: bool,
}

impl<C> TaskListController<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a controller for `mode` with an empty, not yet loaded list.
    #[must_use]
    pub fn new(
        repositories: SessionRepositories,
        mode: SessionMode,
        clock: Arc<C>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let actions = Arc::new(TaskActionService::new(
            repositories.for_mode(mode),
            Arc::clone(&clock),
            Arc::clone(&notifier),
        ));
        Self {
            repositories,
            clock,
            notifier,
            mode,
            actions,
            loading: AtomicBool::new(false),
            search_term: String::new(),
            add_form_open: false,
        }
    }

    /// Creates a controller and performs the initial load.
    pub async fn mount(
        repositories: SessionRepositories,
        mode: SessionMode,
        clock: Arc<C>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let controller = Self::new(repositories, mode, clock, notifier);
        controller.load_tasks().await;
        controller
    }

    /// Returns the active session mode.
    #[must_use]
    pub const fn mode(&self) -> SessionMode {
        self.mode
    }

    /// Returns the action service for the active session.
    #[must_use]
    pub const fn actions(&self) -> &Arc<TaskActionService<C>> {
        &self.actions
    }

    /// Reloads the task list from the active repository.
    pub async fn load_tasks(&self) {
        self.loading.store(true, Ordering::Release);
        let _loading = LoadingGuard(&self.loading);
        self.actions.load().await;
    }

    /// Starts a new session in `mode` and loads its tasks.
    ///
    /// The previous list is discarded; nothing carries over between modes.
    pub async fn switch_mode(&mut self, mode: SessionMode) {
        info!(from = ?self.mode, to = ?mode, "task session mode changed");
        self.mode = mode;
        self.actions = Arc::new(TaskActionService::new(
            self.repositories.for_mode(mode),
            Arc::clone(&self.clock),
            Arc::clone(&self.notifier),
        ));
        self.add_form_open = false;
        self.load_tasks().await;
    }

    /// Returns `true` while a load is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Returns the current search term.
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Sets the search term.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Returns `true` when the search term is not blank.
    #[must_use]
    pub fn is_searching(&self) -> bool {
        !self.search_term.trim().is_empty()
    }

    /// Returns the tasks matching the current search term.
    #[must_use]
    pub fn filtered_tasks(&self) -> Vec<Task> {
        filter_tasks(&self.actions.tasks(), &self.search_term)
    }

    /// Opens the add form. Refused while an add is in flight.
    pub fn open_add_form(&mut self) -> bool {
        if self.actions.is_adding() {
            return false;
        }
        self.add_form_open = true;
        true
    }

    /// Closes the add form without adding anything.
    pub const fn cancel_add_form(&mut self) {
        self.add_form_open = false;
    }

    /// Returns `true` while the add form is open.
    #[must_use]
    pub const fn is_add_form_open(&self) -> bool {
        self.add_form_open
    }

    /// Adds a task from the add form, closing the form on success.
    pub async fn submit_task(&mut self, text: &str) -> bool {
        let added = self.actions.add_task(text).await;
        if added {
            self.add_form_open = false;
        }
        added
    }

    /// Flips the completion flag of a task.
    pub async fn toggle_task(&self, id: &TaskId) -> bool {
        self.actions.toggle_task(id).await
    }

    /// Deletes a task.
    pub async fn delete_task(&self, id: &TaskId) -> bool {
        self.actions.delete_task(id).await
    }

    /// Builds the view model for the current state.
    #[must_use]
    pub fn view(&self) -> TaskListView {
        let all = self.actions.tasks();
        let tasks = filter_tasks(&all, &self.search_term);
        let show_empty_state = tasks.is_empty() && !self.add_form_open;
        TaskListView {
            mode: self.mode,
            total_count: all.len(),
            tasks,
            is_loading: self.is_loading(),
            is_adding_task: self.actions.is_adding(),
            is_add_form_open: self.add_form_open,
            is_searching: self.is_searching(),
            show_empty_state,
        }
    }
}
