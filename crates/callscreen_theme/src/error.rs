//! Storage error types

use thiserror::Error;

/// Persistence failures. The theme store logs these and carries on.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backend could not be read or written
    #[error("Storage I/O failed for `{key}`: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Stored payload is not what we expected
    #[error("Malformed value for `{key}`: {reason}")]
    Malformed { key: String, reason: String },

    /// JSON encode/decode failure
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Backend refused the operation (armed test failures, read-only media)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;
