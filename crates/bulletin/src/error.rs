//! Error types for bulletin.
//!
//! Everything that can go wrong below the command line surfaces as one of
//! these variants. Recoverable conditions (a corrupt persisted value, a blank
//! submission, a stale delete) are not errors and never reach this type.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for bulletin operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// The database schema cannot be used by this build.
    #[error("unsupported database schema: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    /// Writing the post collection back to the store failed.
    #[error("failed to write '{key}' to the store: {source}")]
    StorageWrite {
        /// Store key that was being written.
        key: String,
        /// The underlying error.
        #[source]
        source: Box<Error>,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system or terminal operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for bulletin operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Wrap a store failure that happened while persisting `key`.
    #[must_use]
    pub fn storage_write(key: impl Into<String>, source: Error) -> Self {
        Self::StorageWrite {
            key: key.into(),
            source: Box::new(source),
        }
    }

    /// Check if this error came from persisting the post collection.
    #[must_use]
    pub fn is_storage_write(&self) -> bool {
        matches!(self, Self::StorageWrite { .. })
    }
}
