//! Workflow configuration.

use vcensor_client::ApiClientConfig;

/// Configuration for the workflow coordinator.
#[derive(Debug, Clone, Default)]
pub struct WorkflowConfig {
    /// Control-plane client configuration
    pub api: ApiClientConfig,
    /// Public bucket name used to render direct playback URLs
    pub public_bucket: Option<String>,
}

impl WorkflowConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            api: ApiClientConfig::from_env(),
            public_bucket: std::env::var("VCENSOR_PUBLIC_BUCKET").ok(),
        }
    }
}
