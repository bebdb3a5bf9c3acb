//! Storage transfer error types.

use reqwest::StatusCode;
use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    /// The blob store could not be reached at all.
    #[error("Error connecting to the blob store: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// The blob store answered the transfer with a non-success status.
    #[error("Blob store rejected the transfer ({status}): {message}")]
    Rejected { status: StatusCode, message: String },
}

impl StorageError {
    pub fn is_unreachable(&self) -> bool {
        matches!(self, StorageError::Unreachable(_))
    }
}
