//! HTTP client wrapper with bounded timeout and bounded retry
//!
//! Every repository goes through [`ApiClient`]. A call is retried only on
//! transport-level failures; application-level HTTP statuses come back to
//! the caller untouched.

use crate::{
    constants::{MAX_ATTEMPTS, REQUEST_TIMEOUT_SECS, RETRY_PAUSE_MS, USER_AGENT},
    error::ApiError,
};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Retry policy applied to transport-level failures
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Fixed pause between attempts
    pub pause: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            pause: Duration::from_millis(RETRY_PAUSE_MS),
        }
    }
}

/// State of one logical call as it moves through the retry budget
#[derive(Debug)]
enum CallState {
    /// An attempt is about to be issued
    InFlight { attempt: u32 },
    /// The previous attempt failed with a retryable error; pause, then
    /// re-enter flight
    Retrying { attempt: u32 },
}

/// Thin wrapper around [`reqwest::Client`] owning the timeout and retry
/// behavior shared by every repository. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    policy: RetryPolicy,
}

impl ApiClient {
    /// Creates a client with the default timeout and retry policy.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_policy(RetryPolicy::default())
    }

    /// Creates a client with a custom retry policy.
    pub fn with_policy(policy: RetryPolicy) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(ApiError::from_transport)?;

        Ok(Self { http, policy })
    }

    /// Issues a GET request, retrying transport-level failures.
    ///
    /// Non-success statuses are not retried; the response is handed back
    /// for the caller to check.
    pub async fn get(&self, url: &str) -> Result<Response, ApiError> {
        self.get_with(url, &[]).await
    }

    /// Like [`ApiClient::get`] with query parameters appended, encoded.
    pub async fn get_with(&self, url: &str, query: &[(&str, &str)]) -> Result<Response, ApiError> {
        execute(self.policy, || async move {
            self.http
                .get(url)
                .query(query)
                .send()
                .await
                .map_err(ApiError::from_transport)
        })
        .await
    }

    /// Issues a GET request and decodes a JSON body.
    ///
    /// Maps non-2xx statuses to [`ApiError::HttpStatus`] and malformed
    /// bodies to [`ApiError::Parse`]; neither is retried.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        self.get_json_with(url, &[]).await
    }

    /// Like [`ApiClient::get_json`] with query parameters appended.
    pub async fn get_json_with<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let response = self.get_with(url, query).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::HttpStatus(status));
        }

        let body = response.text().await.map_err(ApiError::from_transport)?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Drives one logical call through the retry state machine.
///
/// `InFlight` issues an attempt. A retryable failure with budget left
/// moves to `Retrying`, which pauses for the fixed delay and re-enters
/// `InFlight`. Success, a non-retryable error, or an exhausted budget
/// terminates the machine.
pub(crate) async fn execute<T, F, Fut>(policy: RetryPolicy, op: F) -> Result<T, ApiError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut state = CallState::InFlight { attempt: 1 };
    loop {
        state = match state {
            CallState::InFlight { attempt } => match op().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt < policy.max_attempts => {
                    tracing::warn!(
                        attempt,
                        max_attempts = policy.max_attempts,
                        error = %err,
                        "request failed, retrying"
                    );
                    CallState::Retrying { attempt }
                }
                Err(err) => return Err(err),
            },
            CallState::Retrying { attempt } => {
                sleep(policy.pause).await;
                CallState::InFlight {
                    attempt: attempt + 1,
                }
            }
        };
    }
}
