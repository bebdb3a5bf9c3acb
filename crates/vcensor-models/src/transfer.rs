//! Transfer credentials and processing results.

use serde::{Deserialize, Serialize};

use crate::key::StorageKey;

/// Short-lived signed URL permitting one direct write to a storage key.
///
/// Consumed by a single transfer; never cached or reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadCredential {
    pub url: String,
}

impl UploadCredential {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Short-lived signed URL permitting reads of a processed output.
///
/// May be re-requested when it expires before use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadCredential {
    pub url: String,
}

impl DownloadCredential {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Output of a successful processing invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingResult {
    /// Storage key of the censored output.
    pub output_key: StorageKey,
}

impl ProcessingResult {
    pub fn new(output_key: StorageKey) -> Self {
        Self { output_key }
    }

    /// Public blob-store URL for direct playback of the output.
    pub fn public_object_url(&self, bucket: &str) -> String {
        format!("https://{}.s3.amazonaws.com/{}", bucket, self.output_key)
    }
}
