//! Persistent key-value storage.
//!
//! Models the browser's synchronous key-value store: string keys mapping to
//! string values, read and written whole. Guest task lists and the persisted
//! session token live here.
//!
//! # Available Adapters
//!
//! - [`InMemoryKeyValueStore`]: process-local storage for tests and embedders
//!   that supply their own persistence
//! - [`DirectoryKeyValueStore`]: one file per key inside a capability-scoped
//!   directory

mod directory;
mod memory;

pub use directory::DirectoryKeyValueStore;
pub use memory::InMemoryKeyValueStore;

use std::sync::Arc;
use thiserror::Error;

/// Result type for key-value storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Synchronous string key-value storage.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// Returns `None` when the key has never been written or was removed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the key is invalid or the backing store
    /// cannot be read.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replaces the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the key is invalid or the write fails.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Deletes `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the key is invalid or the delete fails.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

/// Errors returned by key-value stores.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// The key cannot be used as a storage name.
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    /// The backing store failed.
    #[error("storage error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl StorageError {
    /// Wraps a backing-store error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}

/// Rejects keys that are empty or could escape a single file name.
pub(crate) fn validate_key(key: &str) -> StorageResult<()> {
    let is_valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '.'));
    if is_valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}
