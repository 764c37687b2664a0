//! Error types for the sieve library.

use std::path::PathBuf;

use thiserror::Error;

/// Error type shared by every store, capture and workflow operation.
#[derive(Error, Debug)]
pub enum SieveError {
    /// SQLite connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Backend-independent storage failure (read or write of a key)
    #[error("Storage error: {message}")]
    Storage { message: String },
    /// No stored item carries the given ID
    #[error("Item with ID {id} not found")]
    ItemNotFound { id: u64 },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration and runtime wiring errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// A capture could not be turned into a stored item
    #[error("Capture failed: {source}")]
    CaptureFailed {
        #[source]
        source: Box<SieveError>,
    },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> SieveError {
        SieveError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> SieveError {
        SieveError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl SieveError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a storage error from any displayable message.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Wraps a lower-level failure as a capture failure.
    pub fn capture_failed(source: SieveError) -> Self {
        Self::CaptureFailed {
            source: Box::new(source),
        }
    }

    /// Whether this error was raised by input validation rather than by
    /// storage. Validation failures never touch the persisted collection.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| SieveError::database(message).with_source(e))
    }
}

/// Maps a `spawn_blocking` join failure into a configuration error.
pub(crate) fn join_error(e: tokio::task::JoinError) -> SieveError {
    SieveError::Configuration {
        message: format!("Task join error: {e}"),
    }
}

/// Result type alias for sieve operations
pub type Result<T> = std::result::Result<T, SieveError>;
