//! Browser-style local storage for the signed-in identity.
//!
//! Only one record survives a restart: the current identity, stored as JSON
//! under [`IDENTITY_KEY`]. The menu and the order ledger are reseeded on every
//! start.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

use crate::models::Identity;

/// Storage key for the persisted identity.
pub const IDENTITY_KEY: &str = "user";

/// Errors from the local storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored record is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("storage lock poisoned")]
    Poisoned,
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// String key/value storage with the semantics of `window.localStorage`.
pub trait LocalStorage: Send + Sync + fmt::Debug {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Read the persisted identity, if any.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the stored record is corrupt.
pub fn load_identity(storage: &dyn LocalStorage) -> Result<Option<Identity>, StorageError> {
    storage
        .get_item(IDENTITY_KEY)?
        .map(|raw| serde_json::from_str(&raw))
        .transpose()
        .map_err(StorageError::from)
}

/// Persist the current identity.
///
/// # Errors
///
/// Returns `StorageError` if the record cannot be written.
pub fn save_identity(storage: &dyn LocalStorage, identity: &Identity) -> Result<(), StorageError> {
    let raw = serde_json::to_string(identity)?;
    storage.set_item(IDENTITY_KEY, &raw)
}

/// Remove the persisted identity.
///
/// # Errors
///
/// Returns `StorageError` if the record cannot be removed.
pub fn clear_identity(storage: &dyn LocalStorage) -> Result<(), StorageError> {
    storage.remove_item(IDENTITY_KEY)
}

// =============================================================================
// File-backed storage
// =============================================================================

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create storage rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The storage directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl LocalStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(path, value)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// In-memory storage
// =============================================================================

/// Volatile storage for tests and sessions that should not outlive the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        items.remove(key);
        Ok(())
    }
}

/// Storage that keeps every record: removals fail.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct UndeletableStorage(MemoryStorage);

#[cfg(test)]
impl LocalStorage for UndeletableStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.0.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.0.set_item(key, value)
    }

    fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only storage").into())
    }
}
