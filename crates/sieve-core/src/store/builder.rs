//! Builder for creating and configuring ItemStore instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use log::debug;
use tokio::task;

use super::ItemStore;
use crate::{
    error::{join_error, Result, SieveError},
    storage::{KeyValueStorage, MemoryStorage, SqliteStorage},
};

enum Backend {
    Default,
    Database(PathBuf),
    Memory,
    Custom(Arc<dyn KeyValueStorage>),
}

/// Builder for creating and configuring [`ItemStore`] instances.
///
/// # Examples
///
/// ```rust
/// use sieve_core::ItemStoreBuilder;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = ItemStoreBuilder::new().in_memory().build().await?;
/// assert!(store.get_all_tags().await?.is_empty());
/// # Ok(())
/// # }
/// ```
pub struct ItemStoreBuilder {
    backend: Backend,
}

impl ItemStoreBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            backend: Backend::Default,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/sieve/sieve.db` or `~/.local/share/sieve/sieve.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.backend = Backend::Database(path.as_ref().to_path_buf());
        }
        self
    }

    /// Keeps the collection in process memory only.
    pub fn in_memory(mut self) -> Self {
        self.backend = Backend::Memory;
        self
    }

    /// Uses an already constructed storage backend.
    pub fn with_storage(mut self, storage: Arc<dyn KeyValueStorage>) -> Self {
        self.backend = Backend::Custom(storage);
        self
    }

    /// Builds the configured store.
    ///
    /// # Errors
    ///
    /// Returns `SieveError::FileSystem` if the database directory cannot be
    /// created, `SieveError::XdgDirectory` if no default location exists and
    /// `SieveError::Database` if database initialization fails.
    pub async fn build(self) -> Result<ItemStore> {
        let storage: Arc<dyn KeyValueStorage> = match self.backend {
            Backend::Custom(storage) => storage,
            Backend::Memory => Arc::new(MemoryStorage::new()),
            Backend::Database(path) => Arc::new(Self::open_database(path).await?),
            Backend::Default => Arc::new(Self::open_database(Self::default_database_path()?).await?),
        };

        Ok(ItemStore::new(storage))
    }

    async fn open_database(db_path: PathBuf) -> Result<SqliteStorage> {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| SieveError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        debug!("Opening item database at {}", db_path.display());
        task::spawn_blocking(move || SqliteStorage::open(&db_path))
            .await
            .map_err(join_error)?
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("sieve")
            .place_data_file("sieve.db")
            .map_err(|e| SieveError::XdgDirectory(e.to_string()))
    }
}

impl Default for ItemStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}
