//! In-process stand-in for the hosted backend.

use crate::{
    auth::{
        domain::{AccessToken, AuthUser, Credentials, Email, Session, UserId},
        ports::{AuthBackend, SignUpOutcome},
    },
    backend::BackendError,
    task::{
        domain::TaskId,
        ports::{NewTaskRecord, TaskBackend, TaskRecord},
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

#[derive(Debug, Clone)]
struct Account {
    id: UserId,
    email: Email,
    password: String,
    confirmed: bool,
}

impl Account {
    fn user(&self) -> AuthUser {
        AuthUser::new(self.id.clone(), Some(self.email.clone()))
    }
}

#[derive(Debug, Clone)]
struct Row {
    id: String,
    owner: UserId,
    text: String,
    completed: bool,
    created_at: DateTime<Utc>,
    sequence: u64,
}

impl Row {
    fn to_record(&self) -> TaskRecord {
        TaskRecord {
            id: self.id.clone(),
            text: self.text.clone(),
            completed: self.completed,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Default)]
struct BackendState {
    accounts: HashMap<Email, Account>,
    sessions: HashMap<String, UserId>,
    rows: Vec<Row>,
    next_sequence: u64,
    require_confirmation: bool,
    failure: Option<String>,
}

impl BackendState {
    fn check_failure(&self) -> Result<(), BackendError> {
        match &self.failure {
            Some(message) => Err(BackendError::Api {
                status: Some(500),
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn account_by_id(&self, id: &UserId) -> Option<&Account> {
        self.accounts.values().find(|account| account.id == *id)
    }

    fn authorize(&self, token: &AccessToken) -> Result<UserId, BackendError> {
        self.sessions
            .get(token.expose())
            .cloned()
            .ok_or_else(|| BackendError::Api {
                status: Some(401),
                message: "invalid or expired session".to_owned(),
            })
    }

    fn issue_session(&mut self, account: &Account) -> Result<Session, BackendError> {
        let token = Uuid::new_v4().to_string();
        self.sessions.insert(token.clone(), account.id.clone());
        let access_token =
            AccessToken::new(token).map_err(|err| BackendError::Decode(err.to_string()))?;
        Ok(Session::new(account.user(), access_token))
    }

    fn owned_row_mut(&mut self, owner: &UserId, id: &TaskId) -> Result<&mut Row, BackendError> {
        self.rows
            .iter_mut()
            .find(|row| row.owner == *owner && row.id == id.as_str())
            .ok_or_else(|| no_matching_row(id))
    }
}

fn no_matching_row(id: &TaskId) -> BackendError {
    BackendError::Api {
        status: Some(404),
        message: format!("no task matched id {id}"),
    }
}

fn invalid_credentials() -> BackendError {
    BackendError::Api {
        status: Some(400),
        message: "Invalid login credentials".to_owned(),
    }
}

/// Hosted-backend fake holding accounts, sessions and task rows in memory.
///
/// Mirrors the behaviour the application relies on: row access is limited to
/// the session's user, rows list newest first, and sign-up can be made to
/// wait for email confirmation. Every call can be forced to fail with
/// [`InMemoryBackend::fail_with`].
#[derive(Clone)]
pub struct InMemoryBackend {
    state: Arc<RwLock<BackendState>>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBackend {
    /// Creates an empty backend using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }

    /// Creates an empty backend stamping rows with `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            state: Arc::new(RwLock::new(BackendState::default())),
            clock,
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BackendState>, BackendError> {
        self.state
            .read()
            .map_err(|err| BackendError::Transport(err.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BackendState>, BackendError> {
        self.state
            .write()
            .map_err(|err| BackendError::Transport(err.to_string()))
    }

    /// Creates a confirmed account directly, bypassing sign-up.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the email is invalid or already taken.
    pub fn register_user(&self, email: &str, password: &str) -> Result<UserId, BackendError> {
        let credentials = Credentials::new(email, password)
            .map_err(|err| BackendError::api(err.to_string()))?;
        let mut state = self.write()?;
        create_account(&mut state, &credentials, true).map(|account| account.id)
    }

    /// Inserts a row owned by `owner` without a session.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backend state is unavailable.
    pub fn seed_task(
        &self,
        owner: &UserId,
        text: &str,
        completed: bool,
    ) -> Result<TaskRecord, BackendError> {
        let created_at = self.clock.utc();
        let mut state = self.write()?;
        Ok(insert_row(&mut state, owner.clone(), text, completed, created_at))
    }

    /// Returns every row owned by `owner`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backend state is unavailable.
    pub fn rows_for(&self, owner: &UserId) -> Result<Vec<TaskRecord>, BackendError> {
        let state = self.read()?;
        Ok(list_rows(&state, owner))
    }

    /// Makes sign-up wait for email confirmation instead of signing in.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backend state is unavailable.
    pub fn require_email_confirmation(&self, required: bool) -> Result<(), BackendError> {
        self.write()?.require_confirmation = required;
        Ok(())
    }

    /// Confirms a pending account.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when no account uses `email`.
    pub fn confirm_email(&self, email: &str) -> Result<(), BackendError> {
        let address = Email::new(email).map_err(|err| BackendError::api(err.to_string()))?;
        let mut state = self.write()?;
        let account = state
            .accounts
            .get_mut(&address)
            .ok_or_else(|| BackendError::api(format!("no account for {address}")))?;
        account.confirmed = true;
        Ok(())
    }

    /// Invalidates every issued token.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backend state is unavailable.
    pub fn revoke_all_sessions(&self) -> Result<(), BackendError> {
        self.write()?.sessions.clear();
        Ok(())
    }

    /// Makes every subsequent call fail with `message`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backend state is unavailable.
    pub fn fail_with(&self, message: impl Into<String>) -> Result<(), BackendError> {
        self.write()?.failure = Some(message.into());
        Ok(())
    }

    /// Stops failing calls.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backend state is unavailable.
    pub fn recover(&self) -> Result<(), BackendError> {
        self.write()?.failure = None;
        Ok(())
    }
}

fn create_account(
    state: &mut BackendState,
    credentials: &Credentials,
    confirmed: bool,
) -> Result<Account, BackendError> {
    if state.accounts.contains_key(credentials.email()) {
        return Err(BackendError::Api {
            status: Some(422),
            message: "User already registered".to_owned(),
        });
    }
    let id = UserId::new(Uuid::new_v4().to_string())
        .map_err(|err| BackendError::Decode(err.to_string()))?;
    let account = Account {
        id,
        email: credentials.email().clone(),
        password: credentials.password().expose().to_owned(),
        confirmed,
    };
    state
        .accounts
        .insert(account.email.clone(), account.clone());
    Ok(account)
}

fn insert_row(
    state: &mut BackendState,
    owner: UserId,
    text: &str,
    completed: bool,
    created_at: DateTime<Utc>,
) -> TaskRecord {
    let row = Row {
        id: Uuid::new_v4().to_string(),
        owner,
        text: text.to_owned(),
        completed,
        created_at,
        sequence: state.next_sequence,
    };
    state.next_sequence += 1;
    let record = row.to_record();
    state.rows.push(row);
    record
}

fn list_rows(state: &BackendState, owner: &UserId) -> Vec<TaskRecord> {
    let mut rows: Vec<&Row> = state.rows.iter().filter(|row| row.owner == *owner).collect();
    rows.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then(b.sequence.cmp(&a.sequence))
    });
    rows.into_iter().map(Row::to_record).collect()
}

#[async_trait]
impl AuthBackend for InMemoryBackend {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, BackendError> {
        let mut state = self.write()?;
        state.check_failure()?;
        let account = state
            .accounts
            .get(credentials.email())
            .filter(|account| account.password == credentials.password().expose())
            .cloned()
            .ok_or_else(invalid_credentials)?;
        if !account.confirmed {
            return Err(BackendError::Api {
                status: Some(400),
                message: "Email not confirmed".to_owned(),
            });
        }
        state.issue_session(&account)
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<SignUpOutcome, BackendError> {
        let mut state = self.write()?;
        state.check_failure()?;
        let confirmed = !state.require_confirmation;
        let account = create_account(&mut state, credentials, confirmed)?;
        if confirmed {
            Ok(SignUpOutcome::SignedIn(state.issue_session(&account)?))
        } else {
            Ok(SignUpOutcome::ConfirmationPending(account.user()))
        }
    }

    async fn sign_out(&self, session: &Session) -> Result<(), BackendError> {
        let mut state = self.write()?;
        state.check_failure()?;
        state.sessions.remove(session.access_token().expose());
        Ok(())
    }

    async fn fetch_user(&self, token: &AccessToken) -> Result<AuthUser, BackendError> {
        let state = self.read()?;
        state.check_failure()?;
        let user_id = state.authorize(token)?;
        state
            .account_by_id(&user_id)
            .map(Account::user)
            .ok_or_else(|| BackendError::api("user not found"))
    }
}

#[async_trait]
impl TaskBackend for InMemoryBackend {
    async fn list_tasks(&self, session: &Session) -> Result<Vec<TaskRecord>, BackendError> {
        let state = self.read()?;
        state.check_failure()?;
        let owner = state.authorize(session.access_token())?;
        Ok(list_rows(&state, &owner))
    }

    async fn insert_task(
        &self,
        session: &Session,
        record: &NewTaskRecord,
    ) -> Result<TaskRecord, BackendError> {
        let created_at = self.clock.utc();
        let mut state = self.write()?;
        state.check_failure()?;
        let owner = state.authorize(session.access_token())?;
        if owner != record.user_id {
            return Err(BackendError::Api {
                status: Some(403),
                message: "new row violates row-level security policy for table \"tasks\""
                    .to_owned(),
            });
        }
        Ok(insert_row(
            &mut state,
            owner,
            &record.text,
            record.completed,
            created_at,
        ))
    }

    async fn update_task_completed(
        &self,
        session: &Session,
        id: &TaskId,
        completed: bool,
    ) -> Result<(), BackendError> {
        let mut state = self.write()?;
        state.check_failure()?;
        let owner = state.authorize(session.access_token())?;
        state.owned_row_mut(&owner, id)?.completed = completed;
        Ok(())
    }

    async fn delete_task(&self, session: &Session, id: &TaskId) -> Result<(), BackendError> {
        let mut state = self.write()?;
        state.check_failure()?;
        let owner = state.authorize(session.access_token())?;
        let position = state
            .rows
            .iter()
            .position(|row| row.owner == owner && row.id == id.as_str())
            .ok_or_else(|| no_matching_row(id))?;
        state.rows.remove(position);
        Ok(())
    }
}
