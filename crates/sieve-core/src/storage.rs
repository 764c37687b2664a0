//! Persistent key-value storage backends.
//!
//! The item store keeps its whole collection as one JSON document under a
//! single key, so a backend only needs to read and replace string values.
//! Calls are blocking; the store runs them on the blocking thread pool.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use crate::{db::Database, error::Result};

/// Blocking key-value storage holding JSON documents.
pub trait KeyValueStorage: Send + Sync {
    /// Reads the document stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the document stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// SQLite-backed storage. A connection is opened for every call, so the
/// handle itself is just a path and can be shared freely.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    db_path: PathBuf,
}

impl SqliteStorage {
    /// Opens (creating if needed) the database at `path` and checks the schema.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db_path = path.as_ref().to_path_buf();
        Database::new(&db_path)?;
        Ok(Self { db_path })
    }

    /// Path of the underlying database file.
    pub fn path(&self) -> &Path {
        &self.db_path
    }
}

impl KeyValueStorage for SqliteStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Database::new(&self.db_path)?.get_value(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        Database::new(&self.db_path)?.set_value(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        Database::new(&self.db_path)?.remove_value(key).map(|_| ())
    }
}

/// Process-local storage, used for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.remove(key);
        Ok(())
    }
}
