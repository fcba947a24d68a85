//! HTTP transport helpers.

use crate::api::parse_reply;
use crate::error::RelayError;
use serde::Serialize;
use std::time::Duration;

#[derive(Serialize)]
struct OutgoingMessage<'a> {
    message: &'a str,
}

/// Build an HTTP client with timeout applied.
pub(super) fn build_http_client(timeout: Duration) -> reqwest::Client {
    // Fall back to reqwest defaults if builder creation fails for any reason.
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// POST one message and read the reply.
pub(super) async fn post_message(
    http: &reqwest::Client,
    endpoint: &str,
    api_key: Option<&str>,
    message: &str,
) -> Result<String, RelayError> {
    let mut request = http.post(endpoint).json(&OutgoingMessage { message });
    if let Some(key) = api_key {
        request = request.bearer_auth(key);
    }

    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(RelayError::Status(status.as_u16(), body));
    }
    parse_reply(&body)
}
