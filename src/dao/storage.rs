use std::error::Error;
use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by storage backends regardless of the underlying medium.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// No record exists under the requested key.
    #[error("record `{id}` not found")]
    NotFound { id: String },
    /// A record already exists under the key being created.
    #[error("record `{id}` already exists")]
    Conflict { id: String },
    /// Applying the requested fields would produce an unreadable record.
    #[error("record `{id}` rejected: {source}")]
    InvalidRecord {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }

    /// No record stored under `id`.
    pub fn not_found(id: impl Into<String>) -> Self {
        StorageError::NotFound { id: id.into() }
    }

    /// A record already exists under `id`.
    pub fn conflict(id: impl Into<String>) -> Self {
        StorageError::Conflict { id: id.into() }
    }
}
