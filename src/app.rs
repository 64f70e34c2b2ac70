//! Top-level composition: who is using the app and which task list they see.
//!
//! [`TaskApp`] restores a previous session on start, lets the user continue
//! as a guest or sign in, and keeps exactly one [`TaskListController`] open
//! in the matching [`SessionMode`]. Signing out closes the list.

use crate::{
    auth::{
        ports::{AuthBackend, SessionProvider, SignUpOutcome},
        services::{AuthService, DEFAULT_SESSION_KEY},
    },
    backend::{BackendError, RestBackend},
    config::AppConfig,
    notification::{Notifier, TracingNotifier},
    storage::{DirectoryKeyValueStore, KeyValueStore, StorageError},
    task::{
        adapters::{GUEST_TASKS_KEY, LocalTaskRepository, RemoteTaskRepository, SessionRepositories},
        domain::SessionMode,
        ports::{TaskBackend, TaskRepository},
        services::TaskListController,
    },
};
use mockable::{Clock, DefaultClock};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Label shown for guest sessions.
pub const GUEST_LABEL: &str = "Guest";

/// Errors raised while wiring the application from configuration.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Local storage could not be opened.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The backend client could not be built.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// The application shell.
pub struct TaskApp<B, S, C>
where
    B: AuthBackend + TaskBackend + 'static,
    S: KeyValueStore + 'static,
    C: Clock + Send + Sync,
{
    auth: Arc<AuthService<B, S>>,
    repositories: SessionRepositories,
    clock: Arc<C>,
    notifier: Arc<dyn Notifier>,
    task_list: Option<TaskListController<C>>,
}

impl TaskApp<RestBackend, DirectoryKeyValueStore, DefaultClock> {
    /// Wires the REST backend, directory storage, system clock and a
    /// log-backed notifier from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError`] when the storage directory cannot be
    /// opened or the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, BootstrapError> {
        let backend = Arc::new(RestBackend::new(&config.backend)?);
        let store = Arc::new(DirectoryKeyValueStore::open(&config.storage.dir)?);
        Ok(Self::with_keys(
            backend,
            store,
            Arc::new(DefaultClock),
            Arc::new(TracingNotifier),
            &config.storage.guest_tasks_key,
            &config.storage.session_key,
        ))
    }
}

impl<B, S, C> TaskApp<B, S, C>
where
    B: AuthBackend + TaskBackend + 'static,
    S: KeyValueStore + 'static,
    C: Clock + Send + Sync,
{
    /// Creates a signed-out application using the default storage keys.
    #[must_use]
    pub fn new(backend: Arc<B>, store: Arc<S>, clock: Arc<C>, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_keys(
            backend,
            store,
            clock,
            notifier,
            GUEST_TASKS_KEY,
            DEFAULT_SESSION_KEY,
        )
    }

    /// Creates a signed-out application using custom storage keys.
    #[must_use]
    pub fn with_keys(
        backend: Arc<B>,
        store: Arc<S>,
        clock: Arc<C>,
        notifier: Arc<dyn Notifier>,
        guest_tasks_key: &str,
        session_key: &str,
    ) -> Self {
        let auth = Arc::new(AuthService::with_session_key(
            Arc::clone(&backend),
            Arc::clone(&store),
            Arc::clone(&notifier),
            session_key,
        ));
        let task_backend: Arc<dyn TaskBackend> = backend;
        let sessions: Arc<dyn SessionProvider> = Arc::clone(&auth) as Arc<dyn SessionProvider>;
        let guest: Arc<dyn TaskRepository> =
            Arc::new(LocalTaskRepository::with_key(store, guest_tasks_key));
        let authenticated: Arc<dyn TaskRepository> =
            Arc::new(RemoteTaskRepository::new(task_backend, sessions));

        Self {
            auth,
            repositories: SessionRepositories::new(guest, authenticated),
            clock,
            notifier,
            task_list: None,
        }
    }

    /// Returns the authentication service.
    #[must_use]
    pub fn auth(&self) -> &AuthService<B, S> {
        &self.auth
    }

    /// Returns the open task list, if any.
    #[must_use]
    pub const fn task_list(&self) -> Option<&TaskListController<C>> {
        self.task_list.as_ref()
    }

    /// Returns the open task list for mutation, if any.
    pub const fn task_list_mut(&mut self) -> Option<&mut TaskListController<C>> {
        self.task_list.as_mut()
    }

    /// Returns who is using the app: the signed-in email, [`GUEST_LABEL`],
    /// or `None` when nobody is.
    #[must_use]
    pub fn user_label(&self) -> Option<String> {
        let mode = self.task_list.as_ref()?.mode();
        match mode {
            SessionMode::Guest => Some(GUEST_LABEL.to_owned()),
            SessionMode::Authenticated => self.auth.current_session().map(|session| {
                session
                    .user()
                    .email()
                    .map_or_else(|| session.user_id().to_string(), ToString::to_string)
            }),
        }
    }

    async fn open(&mut self, mode: SessionMode) {
        match self.task_list.as_mut() {
            Some(task_list) => task_list.switch_mode(mode).await,
            None => {
                self.task_list = Some(
                    TaskListController::mount(
                        self.repositories.clone(),
                        mode,
                        Arc::clone(&self.clock),
                        Arc::clone(&self.notifier),
                    )
                    .await,
                );
            }
        }
    }

    /// Restores a persisted session and opens its task list.
    ///
    /// Returns `true` when a session was restored.
    pub async fn start(&mut self) -> bool {
        if self.auth.restore().await.is_none() {
            return false;
        }
        self.open(SessionMode::Authenticated).await;
        true
    }

    /// Opens the guest task list, ending any signed-in session first.
    pub async fn enter_guest(&mut self) {
        info!("entering guest mode");
        self.end_auth_session().await;
        self.open(SessionMode::Guest).await;
    }

    /// Signs in and opens the user's task list.
    ///
    /// Returns `false` when sign-in failed; the user has been notified.
    pub async fn sign_in(&mut self, email: &str, password: &str) -> bool {
        if self.auth.sign_in(email, password).await.is_err() {
            return false;
        }
        self.open(SessionMode::Authenticated).await;
        true
    }

    /// Registers and, when the backend allows it, opens the new user's task
    /// list.
    ///
    /// Returns `true` only when the user ended up signed in.
    pub async fn sign_up(&mut self, email: &str, password: &str) -> bool {
        match self.auth.sign_up(email, password).await {
            Ok(SignUpOutcome::SignedIn(_)) => {
                self.open(SessionMode::Authenticated).await;
                true
            }
            Ok(SignUpOutcome::ConfirmationPending(_)) | Err(_) => false,
        }
    }

    /// Leaves the current session and closes its task list.
    ///
    /// A live auth session is always ended, whatever mode the list is in.
    pub async fn sign_out(&mut self) {
        self.task_list = None;
        self.end_auth_session().await;
    }

    async fn end_auth_session(&self) {
        if !self.auth.is_signed_in() {
            return;
        }
        if let Err(err) = self.auth.sign_out().await {
            debug!(error = %err, "backend sign-out failed; local session cleared");
        }
    }
}
