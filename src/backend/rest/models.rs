//! Wire payloads for the hosted REST API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of password sign-in and sign-up requests.
#[derive(Debug, Serialize)]
pub(super) struct PasswordGrant<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// User object returned by the auth endpoints.
#[derive(Debug, Deserialize)]
pub(super) struct UserBody {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Successful token response.
#[derive(Debug, Deserialize)]
pub(super) struct TokenBody {
    pub access_token: String,
    pub user: UserBody,
}

/// Sign-up response: a session when the account is active right away,
/// otherwise the bare user object.
#[derive(Debug, Deserialize)]
pub(super) struct SignUpBody {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user: Option<UserBody>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// A `tasks` table row.
#[derive(Debug, Deserialize)]
pub(super) struct TaskRow {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for the `tasks` table.
#[derive(Debug, Serialize)]
pub(super) struct NewTaskRow<'a> {
    pub text: &'a str,
    pub completed: bool,
    pub user_id: &'a str,
}

/// Patch payload for the `tasks` table.
#[derive(Debug, Serialize)]
pub(super) struct CompletedPatch {
    pub completed: bool,
}

/// Error payloads from the auth and table endpoints, which name the message
/// field differently.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    pub(super) fn into_message(self) -> Option<String> {
        self.message
            .or(self.msg)
            .or(self.error_description)
            .or(self.error)
            .filter(|message| !message.trim().is_empty())
    }
}
