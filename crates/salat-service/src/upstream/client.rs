//! Shared `reqwest` client construction and error classification.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};

use salat_core::config::UpstreamConfig;
use salat_core::error::AppError;
use salat_core::traits::UpstreamError;

/// Builds the HTTP client used for all upstream calls.
pub fn build_http_client(config: &UpstreamConfig) -> Result<Client, AppError> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))
}

/// Maps a transport-level failure to an [`UpstreamError`].
pub(crate) fn classify(error: reqwest::Error) -> UpstreamError {
    if error.is_timeout() {
        UpstreamError::Timeout
    } else if error.is_decode() {
        UpstreamError::Malformed(error.to_string())
    } else if let Some(status) = error.status() {
        status_error(status)
    } else {
        UpstreamError::Transport(error.to_string())
    }
}

/// Rejects non-2xx responses.
pub(crate) fn ensure_success(response: Response) -> Result<Response, UpstreamError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(status_error(status))
    }
}

fn status_error(status: StatusCode) -> UpstreamError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        UpstreamError::RateLimited
    } else {
        UpstreamError::Status(status.as_u16())
    }
}

/// Joins a base URL and a path without doubling slashes.
pub(crate) fn endpoint(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
