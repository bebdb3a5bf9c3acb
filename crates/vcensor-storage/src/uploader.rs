//! Presigned blob upload.

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, info};

use vcensor_models::UploadCredential;

use crate::error::{StorageError, StorageResult};

/// Uploader performing single-shot writes against presigned URLs.
#[derive(Clone, Default)]
pub struct BlobUploader {
    http: Client,
}

impl BlobUploader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transfer a payload with the given credential.
    ///
    /// One direct `PUT` of the raw bytes with a `Content-Type` header; no
    /// retry, no chunking. The credential is consumed by the store and must
    /// not be reused.
    pub async fn upload(
        &self,
        credential: &UploadCredential,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<()> {
        debug!(bytes = data.len(), content_type, "Uploading to blob store");

        let response = self
            .http
            .put(&credential.url)
            .header(CONTENT_TYPE, content_type)
            .body(data)
            .send()
            .await
            .map_err(StorageError::Unreachable)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("transfer failed")
                    .to_string()
            } else {
                body.trim().to_string()
            };
            return Err(StorageError::Rejected { status, message });
        }

        info!("Blob upload complete");
        Ok(())
    }
}
