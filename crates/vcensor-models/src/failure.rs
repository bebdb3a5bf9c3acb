//! User-facing failure taxonomy for the workflow.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which workflow step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The user asked to start without selecting a file
    UserInput,
    /// The presigned upload credential could not be obtained
    CredentialRequest,
    /// The direct blob transfer did not complete
    StorageTransfer,
    /// The censoring service reported a processing failure
    Processing,
    /// The download link could not be obtained
    DownloadLink,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::UserInput => "user_input",
            FailureKind::CredentialRequest => "credential_request",
            FailureKind::StorageTransfer => "storage_transfer",
            FailureKind::Processing => "processing",
            FailureKind::DownloadLink => "download_link",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the failing step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureClass {
    /// No response was received at all
    NetworkUnreachable,
    /// A response was received with a non-success status
    ServiceRejected,
}

/// Terminal failure surfaced to the presentation layer.
///
/// `message` is the human-readable text to render: the server-supplied
/// diagnostic when one exists, a fixed connectivity message otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowFailure {
    pub kind: FailureKind,
    /// Transport-level classification; absent for local user errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<FailureClass>,
    pub message: String,
}

impl WorkflowFailure {
    /// A locally detected user error; no collaborator was involved.
    pub fn user_input(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::UserInput,
            class: None,
            message: message.into(),
        }
    }

    /// The service answered the step with an error.
    pub fn rejected(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            class: Some(FailureClass::ServiceRejected),
            message: message.into(),
        }
    }

    /// The step's service could not be reached at all.
    pub fn unreachable(kind: FailureKind) -> Self {
        Self {
            kind,
            class: Some(FailureClass::NetworkUnreachable),
            message: "Error connecting to the server.".to_string(),
        }
    }

    /// Check if this failure was a transport-level one.
    pub fn is_network(&self) -> bool {
        self.class == Some(FailureClass::NetworkUnreachable)
    }
}

impl fmt::Display for WorkflowFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_uses_fixed_connectivity_message() {
        let failure = WorkflowFailure::unreachable(FailureKind::StorageTransfer);
        assert_eq!(failure.message, "Error connecting to the server.");
        assert!(failure.is_network());
    }

    #[test]
    fn test_rejected_carries_server_message() {
        let failure = WorkflowFailure::rejected(FailureKind::Processing, "unsupported codec");
        assert_eq!(failure.to_string(), "unsupported codec");
        assert_eq!(failure.class, Some(FailureClass::ServiceRejected));
        assert!(!failure.is_network());
    }

    #[test]
    fn test_user_input_has_no_transport_class() {
        let failure = WorkflowFailure::user_input("Please select a video!");
        assert_eq!(failure.kind, FailureKind::UserInput);
        assert_eq!(failure.class, None);
    }
}
