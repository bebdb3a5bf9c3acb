//! Control-plane HTTP client.

use std::time::Duration;

use reqwest::{Client, Response};
use tracing::debug;

use vcensor_models::{DownloadCredential, ProcessingResult, StorageKey, UploadCredential};

use crate::error::{self, ClientError, ClientResult};
use crate::types::{ProcessRequest, ProcessResponse, SignedUrlResponse};

/// Configuration for the control-plane client.
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL of the control-plane service
    pub base_url: String,
    /// Request timeout; must cover a full synchronous processing call
    pub timeout: Duration,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout: Duration::from_secs(300), // processing is synchronous and slow
        }
    }
}

impl ApiClientConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("VCENSOR_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            timeout: Duration::from_secs(
                std::env::var("VCENSOR_API_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(300),
            ),
        }
    }
}

/// Client for the censoring control-plane service.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: ApiClientConfig,
}

impl ApiClient {
    /// Create a new client.
    pub fn new(config: ApiClientConfig) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ClientError::Unreachable)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> ClientResult<Self> {
        Self::new(ApiClientConfig::from_env())
    }

    /// Request a presigned upload credential for a storage key.
    pub async fn request_upload_url(&self, key: &StorageKey) -> ClientResult<UploadCredential> {
        let url = format!("{}/generate-presigned-upload-url", self.config.base_url);
        debug!(key = %key, "Requesting upload credential");

        let response = self
            .http
            .get(&url)
            .query(&[("filename", key.as_str())])
            .send()
            .await
            .map_err(ClientError::Unreachable)?;

        let signed: SignedUrlResponse = Self::decode(response).await?;
        Ok(UploadCredential::new(signed.url))
    }

    /// Tell the service that an uploaded object is ready for censoring.
    ///
    /// Blocks until the service reports the output key; processing is
    /// synchronous from the caller's point of view even when it is
    /// long-running on the server.
    pub async fn invoke_processing(&self, key: &StorageKey) -> ClientResult<ProcessingResult> {
        let url = format!("{}/upload", self.config.base_url);
        debug!(key = %key, "Invoking processing");

        let request = ProcessRequest {
            file_name: key.to_string(),
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(ClientError::Unreachable)?;

        let body: ProcessResponse = Self::decode(response).await?;
        Ok(ProcessingResult::new(StorageKey::from(
            body.output_video_s3_key,
        )))
    }

    /// Request a signed download link for a processed output key.
    pub async fn request_download_url(&self, key: &StorageKey) -> ClientResult<DownloadCredential> {
        let url = format!("{}/download-s3-url", self.config.base_url);
        debug!(key = %key, "Requesting download link");

        let response = self
            .http
            .get(&url)
            .query(&[("s3_key", key.as_str())])
            .send()
            .await
            .map_err(ClientError::Unreachable)?;

        let signed: SignedUrlResponse = Self::decode(response).await?;
        Ok(DownloadCredential::new(signed.url))
    }

    /// Decode a JSON body, mapping non-success statuses to `Rejected`.
    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> ClientResult<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

        if !status.is_success() {
            return Err(error::rejected(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ApiClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout, Duration::from_secs(300));
    }
}
