//! Blocking HTTP plumbing shared by the provider clients.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::ProviderError;

/// Longest upstream error body kept in a `ProviderError::Status`.
const MAX_ERROR_BODY_CHARS: usize = 512;

pub fn build_client(timeout: Duration) -> Result<Client, ProviderError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::HttpClient(e.to_string()))
}

pub fn trim_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Map a reqwest send failure to the provider error taxonomy.
pub fn send_error(
    provider: &'static str,
    base_url: &str,
    timeout: Duration,
    e: reqwest::Error,
) -> ProviderError {
    if e.is_connect() {
        ProviderError::Connection {
            provider,
            base_url: base_url.to_string(),
        }
    } else if e.is_timeout() {
        ProviderError::Timeout {
            provider,
            timeout_secs: timeout.as_secs(),
        }
    } else {
        ProviderError::HttpClient(e.to_string())
    }
}

/// Turn a non-success response into `ProviderError::Status`.
pub fn status_error(provider: &'static str, response: Response) -> ProviderError {
    let status = response.status().as_u16();
    let body: String = response
        .text()
        .unwrap_or_default()
        .chars()
        .take(MAX_ERROR_BODY_CHARS)
        .collect();
    ProviderError::Status {
        provider,
        status,
        body,
    }
}

/// Read a JSON body. An empty body yields `Ok(None)`.
pub fn read_json<T: DeserializeOwned>(response: Response) -> Result<Option<T>, ProviderError> {
    let text = response
        .text()
        .map_err(|e| ProviderError::ResponseParsing(e.to_string()))?;
    if text.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|e| ProviderError::ResponseParsing(e.to_string()))
}

pub fn is_pending(status: StatusCode) -> bool {
    status == StatusCode::ACCEPTED
}
