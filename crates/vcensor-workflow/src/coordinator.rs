//! The upload-and-process workflow coordinator.
//!
//! Owns the workflow state machine and sequences the collaborators:
//! sanitizer, credential client, blob uploader, process invoker and result
//! locator, strictly in that order. All state mutation happens here; every
//! mutation that follows an await is applied through the run-identifier
//! guard so responses of an abandoned run are discarded.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use vcensor_client::ApiClient;
use vcensor_models::{
    storage_key_for, DownloadCredential, FailureKind, KeyStamper, ProcessingResult, SourceFile,
    StorageKey, UploadCredential, WorkflowFailure, WorkflowState,
};
use vcensor_storage::BlobUploader;

use crate::config::WorkflowConfig;
use crate::error::{classify_client, classify_storage, WorkflowError, WorkflowResult};

/// Identifier of a single workflow run.
///
/// Changes on every file selection or reset, so a late response can be
/// recognized as belonging to an abandoned run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RunId(Uuid);

impl RunId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Mutable workflow state; single writer behind the coordinator's lock.
#[derive(Debug)]
struct RunState {
    run: RunId,
    state: WorkflowState,
    file: Option<SourceFile>,
    storage_key: Option<StorageKey>,
    credential: Option<UploadCredential>,
    result: Option<ProcessingResult>,
    download: Option<DownloadCredential>,
    failure: Option<WorkflowFailure>,
}

impl RunState {
    fn idle() -> Self {
        Self {
            run: RunId::new(),
            state: WorkflowState::Idle,
            file: None,
            storage_key: None,
            credential: None,
            result: None,
            download: None,
            failure: None,
        }
    }
}

/// Read-only view of the workflow for presentation layers.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowSnapshot {
    /// Current state machine position.
    pub state: WorkflowState,
    /// Display name of the selected file, if any.
    pub file_name: Option<String>,
    /// Failure of the current run, if any.
    pub failure: Option<WorkflowFailure>,
    /// Storage key of the censored output once processing succeeded.
    pub output_key: Option<StorageKey>,
    /// Signed download URL once the workflow is ready.
    pub download_url: Option<String>,
    /// Public playback URL of the output, when a public bucket is configured.
    pub preview_url: Option<String>,
}

/// Coordinates one upload-and-process workflow at a time.
///
/// Cloning shares the underlying state, so a presentation layer may read
/// snapshots or select a new file while a run is in flight; a new selection
/// abandons the run rather than starting a second one.
#[derive(Clone)]
pub struct WorkflowCoordinator {
    api: ApiClient,
    uploader: BlobUploader,
    config: WorkflowConfig,
    stamper: Arc<KeyStamper>,
    state: Arc<Mutex<RunState>>,
}

impl WorkflowCoordinator {
    /// Create a coordinator from configuration.
    pub fn new(config: WorkflowConfig) -> WorkflowResult<Self> {
        let api = ApiClient::new(config.api.clone())
            .map_err(|e| WorkflowError::Config(e.to_string()))?;

        Ok(Self {
            api,
            uploader: BlobUploader::new(),
            config,
            stamper: Arc::new(KeyStamper::new()),
            state: Arc::new(Mutex::new(RunState::idle())),
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> WorkflowResult<Self> {
        Self::new(WorkflowConfig::from_env())
    }

    /// Select a file, discarding any prior run.
    ///
    /// Clears credentials, results and failures of the previous selection
    /// and issues a fresh run identifier; an in-flight run keeps executing
    /// but its responses will no longer be applied.
    pub fn select_file(&self, file: SourceFile) {
        let mut s = self.lock();
        if s.state.is_in_flight() {
            info!(file = %file.name, "Abandoning in-flight run for a new selection");
        }
        *s = RunState {
            state: WorkflowState::FileSelected,
            file: Some(file),
            ..RunState::idle()
        };
    }

    /// Reset to idle, discarding everything.
    pub fn reset(&self) {
        *self.lock() = RunState::idle();
    }

    /// Execute the workflow for the selected file.
    ///
    /// Walks credential request, blob transfer, processing and download-link
    /// retrieval strictly in order; the first failing step records a
    /// terminal failure and nothing after it runs. Returns `Ok` when the run
    /// reached `Ready` or was abandoned by a newer selection.
    pub async fn run(&self) -> WorkflowResult<()> {
        let (run, file, key) = {
            let mut s = self.lock();
            if s.state.is_in_flight() || s.state.is_terminal() {
                warn!(state = %s.state, "Run not started; a fresh file selection is required");
                return Ok(());
            }
            let Some(file) = s.file.clone() else {
                let failure = WorkflowFailure::user_input("Please select a video!");
                s.failure = Some(failure.clone());
                return Err(WorkflowError::Run(failure));
            };

            let stamp = self.stamper.next(Utc::now());
            let key = storage_key_for(&file.name, stamp);
            s.storage_key = Some(key.clone());
            s.state = WorkflowState::RequestingCredential;
            (s.run, file, key)
        };

        info!(file = %file.name, key = %key, "Starting upload-and-process run");

        let credential = match self.api.request_upload_url(&key).await {
            Ok(credential) => credential,
            Err(e) => return self.fail(run, classify_client(FailureKind::CredentialRequest, e)),
        };
        if !self.apply(run, |s| {
            s.credential = Some(credential.clone());
            s.state = WorkflowState::Uploading;
        }) {
            return Ok(());
        }

        // Direct transfer: the bytes never touch the control plane.
        if let Err(e) = self
            .uploader
            .upload(&credential, file.data.clone(), &file.content_type)
            .await
        {
            return self.fail(run, classify_storage(e));
        }
        if !self.apply(run, |s| s.state = WorkflowState::Processing) {
            return Ok(());
        }

        let result = match self.api.invoke_processing(&key).await {
            Ok(result) => result,
            Err(e) => return self.fail(run, classify_client(FailureKind::Processing, e)),
        };
        if !self.apply(run, |s| {
            s.result = Some(result.clone());
            s.state = WorkflowState::FetchingDownloadLink;
        }) {
            return Ok(());
        }

        // The processed output is kept even when only the link fetch fails,
        // so this last step can be retried on its own.
        let output_key = result.output_key.clone();
        match self.api.request_download_url(&output_key).await {
            Ok(link) => {
                if self.apply(run, |s| {
                    s.download = Some(link.clone());
                    s.state = WorkflowState::Ready;
                }) {
                    info!(key = %output_key, "Workflow ready");
                }
                Ok(())
            }
            Err(e) => self.fail(run, classify_client(FailureKind::DownloadLink, e)),
        }
    }

    /// Re-run only the download-link step.
    ///
    /// Valid whenever a processed output is held: after a download-link
    /// failure, or when a previously fetched link expired before use. The
    /// upload and processing steps are not repeated.
    pub async fn refresh_download_url(&self) -> WorkflowResult<()> {
        let (run, output_key) = {
            let mut s = self.lock();
            let Some(result) = s.result.clone() else {
                let failure =
                    WorkflowFailure::user_input("No processed video available for download.");
                s.failure = Some(failure.clone());
                return Err(WorkflowError::Run(failure));
            };
            s.failure = None;
            s.state = WorkflowState::FetchingDownloadLink;
            (s.run, result.output_key)
        };

        match self.api.request_download_url(&output_key).await {
            Ok(link) => {
                self.apply(run, |s| {
                    s.download = Some(link.clone());
                    s.state = WorkflowState::Ready;
                });
                Ok(())
            }
            Err(e) => self.fail(run, classify_client(FailureKind::DownloadLink, e)),
        }
    }

    /// Current state for presentation layers.
    pub fn snapshot(&self) -> WorkflowSnapshot {
        let s = self.lock();
        let preview_url = match (&self.config.public_bucket, &s.result) {
            (Some(bucket), Some(result)) => Some(result.public_object_url(bucket)),
            _ => None,
        };

        WorkflowSnapshot {
            state: s.state,
            file_name: s.file.as_ref().map(|f| f.name.clone()),
            failure: s.failure.clone(),
            output_key: s.result.as_ref().map(|r| r.output_key.clone()),
            download_url: s.download.as_ref().map(|d| d.url.clone()),
            preview_url,
        }
    }

    /// Current state machine position.
    pub fn state(&self) -> WorkflowState {
        self.lock().state
    }

    /// Apply a mutation if `run` is still the current run.
    ///
    /// Responses that arrive for an abandoned run are discarded here.
    fn apply(&self, run: RunId, mutate: impl FnOnce(&mut RunState)) -> bool {
        let mut s = self.lock();
        if s.run != run {
            debug!("Discarding response for an abandoned run");
            return false;
        }
        mutate(&mut s);
        true
    }

    /// Record a terminal failure for `run` and surface it to the caller.
    fn fail(&self, run: RunId, failure: WorkflowFailure) -> WorkflowResult<()> {
        let applied = self.apply(run, |s| {
            s.state = WorkflowState::Failed;
            s.failure = Some(failure.clone());
        });
        if applied {
            warn!(kind = %failure.kind, "Workflow failed: {}", failure);
            Err(WorkflowError::Run(failure))
        } else {
            Ok(())
        }
    }

    fn lock(&self) -> MutexGuard<'_, RunState> {
        // The lock is only held for synchronous mutation, never across an
        // await; a poisoned lock still holds consistent state.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
