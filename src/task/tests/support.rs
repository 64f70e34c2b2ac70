//! Shared fixtures for task tests.

use crate::{
    auth::{
        domain::{AccessToken, AuthUser, Email, Session, UserId},
        ports::SessionProvider,
    },
    backend::BackendError,
    storage::InMemoryKeyValueStore,
    task::{
        adapters::LocalTaskRepository,
        domain::{Task, TaskId, TaskText},
        ports::{
            NewTaskRecord, TaskBackend, TaskRecord, TaskRepository, TaskRepositoryResult,
        },
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use mockable::Clock;
use mockall::mock;
use std::sync::{
    Arc,
    atomic::{AtomicI64, Ordering},
};

/// Clock that advances one second on every reading.
pub(super) struct SteppingClock {
    next: AtomicI64,
}

impl SteppingClock {
    pub(super) const fn new() -> Self {
        Self {
            next: AtomicI64::new(1_700_000_000),
        }
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let seconds = self.next.fetch_add(1, Ordering::SeqCst);
        DateTime::from_timestamp(seconds, 0).expect("timestamp should be in range")
    }
}

/// Session provider returning a fixed value.
pub(super) struct StaticSession(pub Option<Session>);

impl SessionProvider for StaticSession {
    fn current_session(&self) -> Option<Session> {
        self.0.clone()
    }
}

pub(super) fn signed_in_session() -> Session {
    let user = AuthUser::new(
        UserId::new("user-1").expect("valid user id"),
        Some(Email::new("ada@example.com").expect("valid email")),
    );
    Session::new(user, AccessToken::new("token-1").expect("valid token"))
}

pub(super) fn task(text: &str, clock: &impl Clock) -> Task {
    Task::new(TaskText::new(text).expect("valid task text"), clock)
}

pub(super) fn guest_repository() -> (InMemoryKeyValueStore, LocalTaskRepository<InMemoryKeyValueStore>) {
    let store = InMemoryKeyValueStore::new();
    let repository = LocalTaskRepository::new(Arc::new(store.clone()));
    (store, repository)
}

/// Repository that yields once before every create, leaving the add in
/// flight for one poll.
pub(super) struct YieldingRepository<R>(pub R);

#[async_trait]
impl<R: TaskRepository> TaskRepository for YieldingRepository<R> {
    async fn load(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.0.load().await
    }

    async fn create(&self, task: Task) -> TaskRepositoryResult<Task> {
        tokio::task::yield_now().await;
        self.0.create(task).await
    }

    async fn update(&self, id: &TaskId, completed: bool) -> TaskRepositoryResult<()> {
        self.0.update(id, completed).await
    }

    async fn remove(&self, id: &TaskId) -> TaskRepositoryResult<()> {
        self.0.remove(id).await
    }
}

mock! {
    pub Repository {}

    #[async_trait]
    impl TaskRepository for Repository {
        async fn load(&self) -> TaskRepositoryResult<Vec<Task>>;
        async fn create(&self, task: Task) -> TaskRepositoryResult<Task>;
        async fn update(&self, id: &TaskId, completed: bool) -> TaskRepositoryResult<()>;
        async fn remove(&self, id: &TaskId) -> TaskRepositoryResult<()>;
    }
}

mock! {
    pub Backend {}

    #[async_trait]
    impl TaskBackend for Backend {
        async fn list_tasks(&self, session: &Session) -> Result<Vec<TaskRecord>, BackendError>;
        async fn insert_task(
            &self,
            session: &Session,
            record: &NewTaskRecord,
        ) -> Result<TaskRecord, BackendError>;
        async fn update_task_completed(
            &self,
            session: &Session,
            id: &TaskId,
            completed: bool,
        ) -> Result<(), BackendError>;
        async fn delete_task(&self, session: &Session, id: &TaskId) -> Result<(), BackendError>;
    }
}
