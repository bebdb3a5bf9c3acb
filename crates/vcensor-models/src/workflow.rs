//! Workflow state machine positions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of the upload-and-process workflow.
///
/// A run walks `FileSelected` through `Ready` strictly in order; `Failed`
/// absorbs any step's failure. `Ready` and `Failed` are terminal for a run;
/// selecting a new file starts over at `FileSelected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    /// No file selected yet
    #[default]
    Idle,
    /// A file is selected and a run may start
    FileSelected,
    /// Waiting for the presigned upload credential
    RequestingCredential,
    /// Transferring the file bytes to the blob store
    Uploading,
    /// Waiting for the censoring service to produce the output
    Processing,
    /// Waiting for the signed download link
    FetchingDownloadLink,
    /// Download link available; the run is complete
    Ready,
    /// The run ended in a classified failure
    Failed,
}

impl WorkflowState {
    /// Get string representation of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::FileSelected => "file_selected",
            WorkflowState::RequestingCredential => "requesting_credential",
            WorkflowState::Uploading => "uploading",
            WorkflowState::Processing => "processing",
            WorkflowState::FetchingDownloadLink => "fetching_download_link",
            WorkflowState::Ready => "ready",
            WorkflowState::Failed => "failed",
        }
    }

    /// Check if this is a terminal state for the current run.
    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkflowState::Ready | WorkflowState::Failed)
    }

    /// Check if a collaborator call is outstanding in this state.
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            WorkflowState::RequestingCredential
                | WorkflowState::Uploading
                | WorkflowState::Processing
                | WorkflowState::FetchingDownloadLink
        )
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(WorkflowState::Ready.is_terminal());
        assert!(WorkflowState::Failed.is_terminal());
        assert!(!WorkflowState::Idle.is_terminal());
        assert!(!WorkflowState::Processing.is_terminal());
    }

    #[test]
    fn test_in_flight_states() {
        assert!(WorkflowState::RequestingCredential.is_in_flight());
        assert!(WorkflowState::Uploading.is_in_flight());
        assert!(WorkflowState::Processing.is_in_flight());
        assert!(WorkflowState::FetchingDownloadLink.is_in_flight());
        assert!(!WorkflowState::Idle.is_in_flight());
        assert!(!WorkflowState::FileSelected.is_in_flight());
        assert!(!WorkflowState::Ready.is_in_flight());
        assert!(!WorkflowState::Failed.is_in_flight());
    }

    #[test]
    fn test_snake_case_serialization() {
        let json = serde_json::to_string(&WorkflowState::FetchingDownloadLink).unwrap();
        assert_eq!(json, "\"fetching_download_link\"");
        assert_eq!(WorkflowState::default(), WorkflowState::Idle);
    }
}
