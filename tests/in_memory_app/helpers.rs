//! Shared helpers for in-memory application tests.

use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;
use tasklist::{
    app::TaskApp,
    backend::InMemoryBackend,
    notification::{Notifier, RecordingNotifier},
    storage::InMemoryKeyValueStore,
    task::domain::{Task, TaskId},
};

/// Application type used by these tests.
pub type TestApp = TaskApp<InMemoryBackend, InMemoryKeyValueStore, DefaultClock>;

/// Backend, storage and notifier shared by one or more application instances.
pub struct Environment {
    pub backend: InMemoryBackend,
    pub store: InMemoryKeyValueStore,
    pub notifier: Arc<RecordingNotifier>,
}

impl Environment {
    /// Starts a fresh application instance over the shared state, as a page
    /// reload would.
    pub fn open_app(&self) -> TestApp {
        TaskApp::new(
            Arc::new(self.backend.clone()),
            Arc::new(self.store.clone()),
            Arc::new(DefaultClock),
            Arc::clone(&self.notifier) as Arc<dyn Notifier>,
        )
    }

    /// Returns the titles of every notification received so far.
    pub fn notification_titles(&self) -> Vec<String> {
        self.notifier
            .notifications()
            .iter()
            .map(|notification| notification.title().to_owned())
            .collect()
    }
}

/// Provides an environment with one confirmed account,
/// `ada@example.com` / `correct horse`.
#[fixture]
pub fn env() -> Environment {
    let backend = InMemoryBackend::new();
    backend
        .register_user("ada@example.com", "correct horse")
        .expect("user should register");
    Environment {
        backend,
        store: InMemoryKeyValueStore::new(),
        notifier: Arc::new(RecordingNotifier::new()),
    }
}

/// Returns the texts of the visible tasks, in display order.
pub fn visible_texts(app: &TestApp) -> Vec<String> {
    app.task_list()
        .map(|list| {
            list.filtered_tasks()
                .iter()
                .map(|task| task.text().as_str().to_owned())
                .collect()
        })
        .unwrap_or_default()
}

/// Finds the identifier of the visible task with `text`.
pub fn id_of(app: &TestApp, text: &str) -> TaskId {
    app.task_list()
        .and_then(|list| {
            list.filtered_tasks()
                .into_iter()
                .find(|task| task.text().as_str() == text)
        })
        .map(|task: Task| task.id().clone())
        .unwrap_or_else(|| panic!("no visible task named {text}"))
}
