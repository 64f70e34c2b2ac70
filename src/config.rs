//! Application configuration loaded from TOML.
//!
//! ```toml
//! [backend]
//! url = "https://project.supabase.co"
//! api_key = "public-anon-key"
//!
//! [storage]
//! dir = ".tasklist"
//! ```

use crate::auth::services::DEFAULT_SESSION_KEY;
use crate::storage::validate_key;
use crate::task::adapters::GUEST_TASKS_KEY;
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path that was read.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Connection settings for the hosted backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the project, e.g. `https://project.supabase.co`.
    pub url: String,
    /// Public API key sent with every request.
    pub api_key: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Name of the task table.
    #[serde(default = "default_tasks_table")]
    pub tasks_table: String,
}

impl BackendConfig {
    /// Creates settings with default timeout and table name.
    #[must_use]
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            timeout_secs: default_timeout_secs(),
            tasks_table: default_tasks_table(),
        }
    }
}

/// Local storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the key-value files.
    pub dir: Utf8PathBuf,
    /// Key of the guest task list.
    pub guest_tasks_key: String,
    /// Key of the persisted session token.
    pub session_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: Utf8PathBuf::from(".tasklist"),
            guest_tasks_key: GUEST_TASKS_KEY.to_owned(),
            session_key: DEFAULT_SESSION_KEY.to_owned(),
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Hosted backend settings.
    pub backend: BackendConfig,
    /// Local storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_tasks_table() -> String {
    "tasks".to_owned()
}

impl AppConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read, otherwise
    /// as [`AppConfig::from_toml_str`].
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let url = self.backend.url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "backend.url must be an http(s) URL, got '{url}'"
            )));
        }
        if self.backend.api_key.trim().is_empty() {
            return Err(ConfigError::Invalid("backend.api_key is empty".to_owned()));
        }
        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "backend.timeout_secs must be positive".to_owned(),
            ));
        }
        if self.backend.tasks_table.trim().is_empty() {
            return Err(ConfigError::Invalid("backend.tasks_table is empty".to_owned()));
        }
        for (field, key) in [
            ("storage.guest_tasks_key", &self.storage.guest_tasks_key),
            ("storage.session_key", &self.storage.session_key),
        ] {
            validate_key(key).map_err(|err| ConfigError::Invalid(format!("{field}: {err}")))?;
        }
        Ok(())
    }
}
