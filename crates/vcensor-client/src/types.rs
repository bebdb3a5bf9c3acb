//! Control-plane wire types.

use serde::{Deserialize, Serialize};

/// Response carrying a signed URL (presigned upload or download link).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedUrlResponse {
    pub url: String,
}

/// Body of a processing invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessRequest {
    /// Storage key of the uploaded source object.
    pub file_name: String,
}

/// Response of a processing invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessResponse {
    /// Storage key of the censored output object.
    pub output_video_s3_key: String,
}
