//! Shared data models for the vcensor client.
//!
//! This crate provides Serde-serializable types for:
//! - The upload-and-process workflow state machine
//! - Storage keys and the filename sanitizer
//! - Transfer credentials and processing results
//! - The user-facing failure taxonomy

pub mod failure;
pub mod key;
pub mod source;
pub mod transfer;
pub mod workflow;

// Re-export common types
pub use failure::{FailureClass, FailureKind, WorkflowFailure};
pub use key::{storage_key_for, KeyStamper, StorageKey};
pub use source::SourceFile;
pub use transfer::{DownloadCredential, ProcessingResult, UploadCredential};
pub use workflow::WorkflowState;
