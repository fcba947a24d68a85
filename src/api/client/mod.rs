//! HTTP implementation of [`MessageRelay`].

mod retry;
mod transport;

use super::MessageRelay;
use crate::config::RelayTarget;
use crate::error::RelayError;
use async_trait::async_trait;
use retry::TimeoutRetry;
use std::time::Duration;
use tracing::{debug, warn};

/// Posts each message as JSON to a configured endpoint.
pub struct HttpRelay {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    retry: TimeoutRetry,
}

impl HttpRelay {
    /// `retries` extra attempts are made only after a timeout.
    pub fn new(target: &RelayTarget, timeout: Duration, retries: u32) -> Self {
        Self {
            http: transport::build_http_client(timeout),
            endpoint: target.endpoint.clone(),
            api_key: target.api_key.clone(),
            retry: TimeoutRetry::new(retries),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl MessageRelay for HttpRelay {
    async fn send(&self, message: &str) -> Result<String, RelayError> {
        let mut attempt: u32 = 0;
        loop {
            debug!(endpoint = %self.endpoint, attempt, "sending message");
            match transport::post_message(
                &self.http,
                &self.endpoint,
                self.api_key.as_deref(),
                message,
            )
            .await
            {
                Ok(reply) => return Ok(reply),
                Err(err) if self.retry.should_retry(&err, attempt) => {
                    warn!(error = %err, attempt, "relay request timed out, retrying");
                    attempt = attempt.saturating_add(1);
                }
                Err(err) => return Err(err),
            }
        }
    }
}
