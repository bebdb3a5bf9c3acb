//! Direct-to-store blob transfer.
//!
//! The raw file bytes never route through the control plane: they are
//! written straight to the blob store with a presigned URL as the only
//! authorization.

pub mod error;
pub mod uploader;

pub use error::{StorageError, StorageResult};
pub use uploader::BlobUploader;
