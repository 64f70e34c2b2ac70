//! Directory-backed key-value store.

use super::{KeyValueStore, StorageError, StorageResult, validate_key};
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io;

/// Stores each key as a file inside a single directory.
///
/// All file access goes through a capability handle on that directory, so a
/// key can never address a file outside it. Writes land in a temporary file
/// first and are renamed into place.
#[derive(Debug)]
pub struct DirectoryKeyValueStore {
    dir: Dir,
}

impl DirectoryKeyValueStore {
    /// Opens `path`, creating it (and missing parents) if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] when the directory cannot be created
    /// or opened.
    pub fn open(path: &Utf8Path) -> StorageResult<Self> {
        std::fs::create_dir_all(path).map_err(StorageError::backend)?;
        let dir = Dir::open_ambient_dir(path, ambient_authority()).map_err(StorageError::backend)?;
        Ok(Self { dir })
    }

    /// Wraps an already-opened directory handle.
    #[must_use]
    pub const fn from_dir(dir: Dir) -> Self {
        Self { dir }
    }
}

impl KeyValueStore for DirectoryKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        validate_key(key)?;
        match self.dir.read_to_string(key) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::backend(err)),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        validate_key(key)?;
        let staging = format!("{key}.tmp");
        self.dir
            .write(&staging, value)
            .map_err(StorageError::backend)?;
        self.dir
            .rename(&staging, &self.dir, key)
            .map_err(StorageError::backend)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        validate_key(key)?;
        match self.dir.remove_file(key) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::backend(err)),
        }
    }
}
