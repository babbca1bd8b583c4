//! Error types for the market dashboard data layer

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the remote market API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request exceeded the per-attempt time bound
    #[error("request timed out")]
    Timeout,

    /// Transport-level failure (DNS, connect, TLS, body read)
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Non-success HTTP status, surfaced without retry
    #[error("HTTP status {0}")]
    HttpStatus(StatusCode),

    /// Response body was not the JSON shape we expect
    #[error("malformed response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    /// Classifies a reqwest transport error into our taxonomy.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err)
        }
    }

    /// True for the transport-level kinds the client retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout | Self::Network(_))
    }
}

/// Errors from the settings store
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Underlying key-value store rejected the operation
    #[error("settings backend error: {0}")]
    Backend(String),

    /// Persisted value could not be decoded
    #[error("corrupt settings value: {0}")]
    Corrupt(String),
}
