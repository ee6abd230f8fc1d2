//! Error types for the Kronos SDK.

use thiserror::Error;

/// SDK operation errors
#[derive(Debug, Error)]
pub enum SdkError {
    /// Request rejected before sending
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Connection error (network, DNS, timeout)
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Non-success HTTP status
    #[error("HTTP {status}: {message}")]
    HttpError {
        /// Status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// Backend answered with `success: false`
    #[error("Backend error: {0}")]
    BackendError(String),

    /// Response body could not be decoded
    #[error("Response parsing error: {0}")]
    ParseError(String),
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            SdkError::ConnectionError(e.to_string())
        } else if e.is_status() {
            match e.status() {
                Some(status) => SdkError::HttpError {
                    status: status.as_u16(),
                    message: e.to_string(),
                },
                None => SdkError::ConnectionError(e.to_string()),
            }
        } else if e.is_decode() {
            SdkError::ParseError(e.to_string())
        } else {
            SdkError::ConnectionError(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::ParseError(format!("JSON parsing error: {}", e))
    }
}
