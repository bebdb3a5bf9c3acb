//! HTTP client for the censoring control-plane service.
//!
//! This crate provides:
//! - Presigned upload credential requests
//! - Processing invocation for uploaded objects
//! - Download link requests for processed outputs

pub mod client;
pub mod error;
pub mod types;

pub use client::{ApiClient, ApiClientConfig};
pub use error::{ClientError, ClientResult};
