//! REST client for a Supabase-compatible hosted backend.
//!
//! Authentication goes through the `/auth/v1` endpoints and task rows
//! through the `/rest/v1/<table>` endpoints. Row-level access is enforced
//! by the backend from the bearer token, so list queries carry no owner
//! filter.

mod models;

use self::models::{
    CompletedPatch, ErrorBody, NewTaskRow, PasswordGrant, SignUpBody, TaskRow, TokenBody,
    UserBody,
};
use crate::{
    auth::{
        domain::{AccessToken, AuthUser, Credentials, Email, Session, UserId},
        ports::{AuthBackend, SignUpOutcome},
    },
    backend::BackendError,
    config::BackendConfig,
    task::{
        domain::TaskId,
        ports::{NewTaskRecord, TaskBackend, TaskRecord},
    },
};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Hosted backend reached over HTTP.
#[derive(Debug, Clone)]
pub struct RestBackend {
    client: Client,
    base_url: String,
    api_key: String,
    tasks_table: String,
}

impl RestBackend {
    /// Builds a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| BackendError::Transport(err.to_string()))?;
        Ok(Self::with_client(config, client))
    }

    /// Uses an existing HTTP client.
    #[must_use]
    pub fn with_client(config: &BackendConfig, client: Client) -> Self {
        Self {
            client,
            base_url: config.url.trim_end_matches('/').to_owned(),
            api_key: config.api_key.clone(),
            tasks_table: config.tasks_table.clone(),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/{path}", self.base_url))
            .header("apikey", &self.api_key)
    }

    fn authorized(&self, method: Method, path: &str, token: &AccessToken) -> RequestBuilder {
        self.request(method, path).bearer_auth(token.expose())
    }

    fn table_path(&self) -> String {
        format!("rest/v1/{}", self.tasks_table)
    }

    async fn execute(request: RequestBuilder) -> Result<Response, BackendError> {
        let response = request
            .send()
            .await
            .map_err(|err| BackendError::Transport(err.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(ErrorBody::into_message)
            .or_else(|| Some(body.trim().to_owned()).filter(|text| !text.is_empty()))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_owned()
            });
        debug!(status = status.as_u16(), %message, "backend request failed");
        Err(BackendError::Api {
            status: Some(status.as_u16()),
            message,
        })
    }

    async fn fetch<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, BackendError> {
        Self::execute(request)
            .await?
            .json::<T>()
            .await
            .map_err(|err| BackendError::Decode(err.to_string()))
    }

    /// Runs a filtered write that must touch exactly one row.
    async fn write_one(request: RequestBuilder, id: &TaskId) -> Result<(), BackendError> {
        let rows: Vec<serde_json::Value> = Self::fetch(
            request
                .query(&[("id", format!("eq.{id}")), ("select", "id".to_owned())])
                .header("Prefer", "return=representation"),
        )
        .await?;
        if rows.is_empty() {
            return Err(BackendError::Api {
                status: None,
                message: format!("no task matched id {id}"),
            });
        }
        Ok(())
    }
}

fn to_user(body: UserBody) -> Result<AuthUser, BackendError> {
    let id = UserId::new(body.id).map_err(|err| BackendError::Decode(err.to_string()))?;
    let email = body.email.and_then(|email| Email::new(email).ok());
    Ok(AuthUser::new(id, email))
}

fn to_session(access_token: String, user: UserBody) -> Result<Session, BackendError> {
    let token = AccessToken::new(access_token).map_err(|err| BackendError::Decode(err.to_string()))?;
    Ok(Session::new(to_user(user)?, token))
}

fn to_record(row: TaskRow) -> TaskRecord {
    TaskRecord {
        id: row.id,
        text: row.text,
        completed: row.completed,
        created_at: row.created_at,
    }
}

#[async_trait]
impl AuthBackend for RestBackend {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, BackendError> {
        let grant = PasswordGrant {
            email: credentials.email().as_str(),
            password: credentials.password().expose(),
        };
        let body: TokenBody = Self::fetch(
            self.request(Method::POST, "auth/v1/token")
                .query(&[("grant_type", "password")])
                .json(&grant),
        )
        .await?;
        to_session(body.access_token, body.user)
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<SignUpOutcome, BackendError> {
        let grant = PasswordGrant {
            email: credentials.email().as_str(),
            password: credentials.password().expose(),
        };
        let body: SignUpBody =
            Self::fetch(self.request(Method::POST, "auth/v1/signup").json(&grant)).await?;

        let user = match (body.user, body.id) {
            (Some(user), _) => user,
            (None, Some(id)) => UserBody {
                id,
                email: body.email,
            },
            (None, None) => {
                return Err(BackendError::Decode(
                    "sign-up response carried no user".to_owned(),
                ));
            }
        };
        match body.access_token {
            Some(token) => Ok(SignUpOutcome::SignedIn(to_session(token, user)?)),
            None => Ok(SignUpOutcome::ConfirmationPending(to_user(user)?)),
        }
    }

    async fn sign_out(&self, session: &Session) -> Result<(), BackendError> {
        Self::execute(self.authorized(Method::POST, "auth/v1/logout", session.access_token()))
            .await?;
        Ok(())
    }

    async fn fetch_user(&self, token: &AccessToken) -> Result<AuthUser, BackendError> {
        let body: UserBody = Self::fetch(self.authorized(Method::GET, "auth/v1/user", token)).await?;
        to_user(body)
    }
}

#[async_trait]
impl TaskBackend for RestBackend {
    async fn list_tasks(&self, session: &Session) -> Result<Vec<TaskRecord>, BackendError> {
        let rows: Vec<TaskRow> = Self::fetch(
            self.authorized(Method::GET, &self.table_path(), session.access_token())
                .query(&[("select", "*"), ("order", "created_at.desc")]),
        )
        .await?;
        Ok(rows.into_iter().map(to_record).collect())
    }

    async fn insert_task(
        &self,
        session: &Session,
        record: &NewTaskRecord,
    ) -> Result<TaskRecord, BackendError> {
        let payload = NewTaskRow {
            text: &record.text,
            completed: record.completed,
            user_id: record.user_id.as_str(),
        };
        let rows: Vec<TaskRow> = Self::fetch(
            self.authorized(Method::POST, &self.table_path(), session.access_token())
                .query(&[("select", "*")])
                .header("Prefer", "return=representation")
                .json(&payload),
        )
        .await?;
        rows.into_iter()
            .next()
            .map(to_record)
            .ok_or_else(|| BackendError::Decode("insert returned no row".to_owned()))
    }

    async fn update_task_completed(
        &self,
        session: &Session,
        id: &TaskId,
        completed: bool,
    ) -> Result<(), BackendError> {
        Self::write_one(
            self.authorized(Method::PATCH, &self.table_path(), session.access_token())
                .json(&CompletedPatch { completed }),
            id,
        )
        .await
    }

    async fn delete_task(&self, session: &Session, id: &TaskId) -> Result<(), BackendError> {
        Self::write_one(
            self.authorized(Method::DELETE, &self.table_path(), session.access_token()),
            id,
        )
        .await
    }
}
