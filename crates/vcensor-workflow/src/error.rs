//! Workflow error types and failure classification.

use thiserror::Error;
use tracing::warn;

use vcensor_client::ClientError;
use vcensor_models::{FailureKind, WorkflowFailure};
use vcensor_storage::StorageError;

pub type WorkflowResult<T> = Result<T, WorkflowError>;

#[derive(Debug, Error)]
pub enum WorkflowError {
    /// A run or step retry ended in a failure; the same failure is recorded
    /// in the workflow state for the presentation layer.
    #[error("{0}")]
    Run(WorkflowFailure),

    /// The coordinator could not be constructed.
    #[error("Failed to configure workflow: {0}")]
    Config(String),
}

impl WorkflowError {
    /// The recorded failure, when this error came out of a run.
    pub fn failure(&self) -> Option<&WorkflowFailure> {
        match self {
            WorkflowError::Run(failure) => Some(failure),
            WorkflowError::Config(_) => None,
        }
    }
}

/// Classify a control-plane client error into the user-facing taxonomy.
pub(crate) fn classify_client(kind: FailureKind, err: ClientError) -> WorkflowFailure {
    match err {
        ClientError::Unreachable(source) => {
            warn!(step = %kind, error = %source, "No response from the control-plane service");
            WorkflowFailure::unreachable(kind)
        }
        ClientError::Rejected { status, message } => {
            warn!(step = %kind, %status, "Control-plane service rejected the request");
            WorkflowFailure::rejected(kind, message)
        }
        ClientError::InvalidResponse(message) => {
            warn!(step = %kind, "Control-plane response did not decode: {message}");
            WorkflowFailure::rejected(kind, message)
        }
    }
}

/// Classify a blob transfer error into the user-facing taxonomy.
pub(crate) fn classify_storage(err: StorageError) -> WorkflowFailure {
    let kind = FailureKind::StorageTransfer;
    match err {
        StorageError::Unreachable(source) => {
            warn!(step = %kind, error = %source, "No response from the blob store");
            WorkflowFailure::unreachable(kind)
        }
        StorageError::Rejected { status, message } => {
            warn!(step = %kind, %status, "Blob store rejected the transfer");
            WorkflowFailure::rejected(kind, message)
        }
    }
}
