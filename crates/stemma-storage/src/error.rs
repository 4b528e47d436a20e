//! Storage error types

use thiserror::Error;

/// Result type alias for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Storage-specific error types
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A stored date column does not parse as an ISO calendar date
    #[error("Invalid stored date: {0}")]
    InvalidDate(#[from] chrono::ParseError),

    /// The graph core rejected stored data, e.g. a link whose endpoint
    /// no longer resolves during a bulk load
    #[error("Graph error: {0}")]
    Core(#[from] stemma_core::Error),

    #[error("Unsupported schema version {found} (supported up to {supported})")]
    SchemaVersion { found: u32, supported: u32 },
}
