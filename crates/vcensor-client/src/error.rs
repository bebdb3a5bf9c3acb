//! Control-plane client error types.

use reqwest::StatusCode;
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// No response was received from the service.
    #[error("Error connecting to the server: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Service rejected the request ({status}): {message}")]
    Rejected { status: StatusCode, message: String },

    /// The service answered successfully but the body did not decode.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    pub fn is_unreachable(&self) -> bool {
        matches!(self, ClientError::Unreachable(_))
    }
}

/// Build a `Rejected` error from a non-success response body.
///
/// Prefers a JSON `message`/`detail`/`error` field, falls back to the raw
/// body, then to the status line.
pub(crate) fn rejected(status: StatusCode, body: &str) -> ClientError {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "detail", "error"]
                .iter()
                .find_map(|field| value.get(field)?.as_str().map(str::to_owned))
        });

    let message = from_json.unwrap_or_else(|| {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        } else {
            trimmed.to_string()
        }
    });

    ClientError::Rejected { status, message }
}
