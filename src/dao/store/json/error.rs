//! Error types shared by the JSON document storage implementation.

use std::path::PathBuf;

use thiserror::Error;

use crate::dao::storage::StorageError;

/// Convenient result alias returning [`JsonDaoError`] failures.
pub type JsonResult<T> = Result<T, JsonDaoError>;

/// Failures that can occur while reading or writing a JSON document.
#[derive(Debug, Error)]
pub enum JsonDaoError {
    /// The document exists but could not be read.
    #[error("failed to read JSON document `{}`", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The document content is not valid for the expected layout.
    #[error("failed to parse JSON document `{}`", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The in-memory document could not be encoded.
    #[error("failed to serialize JSON document `{}`", .path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Writing or replacing the document on disk failed.
    #[error("failed to write JSON document `{}`", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<JsonDaoError> for StorageError {
    fn from(err: JsonDaoError) -> Self {
        StorageError::unavailable(err.to_string(), err)
    }
}
