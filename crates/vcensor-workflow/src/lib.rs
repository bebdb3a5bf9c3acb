//! Upload-and-process workflow coordination.
//!
//! This crate provides:
//! - The workflow coordinator and its state machine
//! - Failure classification for collaborator errors
//! - A read-only snapshot surface for presentation layers

pub mod config;
pub mod coordinator;
pub mod error;

pub use config::WorkflowConfig;
pub use coordinator::{WorkflowCoordinator, WorkflowSnapshot};
pub use error::{WorkflowError, WorkflowResult};
