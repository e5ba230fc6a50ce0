//! Shared reqwest plumbing for provider backends.

use council_application::BackendError;
use council_domain::ProviderKind;
use council_domain::core::string::truncate;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Request timeout for hosted APIs.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Local models can take a long time to load and generate.
pub const LOCAL_TIMEOUT_SECS: u64 = 300;

const MAX_ERROR_BODY_LEN: usize = 500;

pub fn default_timeout(kind: ProviderKind) -> Duration {
    match kind {
        ProviderKind::Ollama => Duration::from_secs(LOCAL_TIMEOUT_SECS),
        _ => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
}

pub fn build_provider_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Send `body` as JSON and decode a JSON response.
///
/// Non-2xx statuses become [`BackendError::HttpStatus`] with the (truncated)
/// response body; undecodable bodies become `MalformedResponse`.
pub(crate) async fn post_json<B, R>(request: RequestBuilder, body: &B) -> Result<R, BackendError>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let response = request
        .json(body)
        .send()
        .await
        .map_err(map_transport_error)?;

    if !response.status().is_success() {
        return Err(error_from_status(response).await);
    }

    let text = response.text().await.map_err(map_transport_error)?;
    debug!(bytes = text.len(), "Provider response received");
    serde_json::from_str(&text).map_err(|e| BackendError::MalformedResponse(e.to_string()))
}

/// The request URL is dropped from the message; it may carry credentials.
pub(crate) fn map_transport_error(err: reqwest::Error) -> BackendError {
    let err = err.without_url();
    if err.is_timeout() {
        BackendError::Timeout
    } else if err.is_connect() {
        BackendError::ConnectionError(err.to_string())
    } else if err.is_decode() {
        BackendError::MalformedResponse(err.to_string())
    } else {
        BackendError::Other(err.to_string())
    }
}

async fn error_from_status(response: Response) -> BackendError {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<unreadable body>".to_string());
    BackendError::HttpStatus {
        status,
        body: truncate(body.trim(), MAX_ERROR_BODY_LEN),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeout_is_longer_for_local_models() {
        assert_eq!(
            default_timeout(ProviderKind::Ollama),
            Duration::from_secs(300)
        );
        assert_eq!(
            default_timeout(ProviderKind::Claude),
            Duration::from_secs(120)
        );
    }
}
