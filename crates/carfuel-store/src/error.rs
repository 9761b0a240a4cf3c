//! Error types for carfuel-store.

use std::path::PathBuf;

/// Result type for carfuel-store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in carfuel-store.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Database error from SQLite.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Failed to create database directory.
    #[error("Failed to create database directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Vehicle not found in database.
    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),

    /// Fuel record not found in database.
    #[error("Fuel record not found: {0}")]
    RecordNotFound(String),

    /// A backup was produced by a newer schema than this build supports.
    #[error("Backup schema version {backup} is newer than supported version {current}")]
    BackupVersionNewer { backup: i32, current: i32 },

    /// Failed to render a timestamp for storage.
    #[error("Timestamp formatting error: {0}")]
    TimestampFormat(#[from] time::error::Format),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
