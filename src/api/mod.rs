//! Relay client: hands a finished message to a remote service.
//!
//! The input engine never talks to the network. The front end passes each
//! submitted message to a [`MessageRelay`] and renders whatever comes back.

use crate::error::RelayError;
use async_trait::async_trait;
use serde_json::Value;

mod client;

pub use client::HttpRelay;

/// Reply fields tried in order on a JSON body.
const REPLY_FIELDS: &[&str] = &["reply", "response", "text"];

/// Destination for submitted messages.
///
/// Tests substitute a canned implementation; production uses [`HttpRelay`].
#[async_trait]
pub trait MessageRelay: Send + Sync {
    async fn send(&self, message: &str) -> Result<String, RelayError>;
}

/// Pull the reply text out of a response body.
///
/// JSON objects must carry one of the known string fields. Anything that is
/// not JSON is taken as a plain-text reply.
pub(crate) fn parse_reply(body: &str) -> Result<String, RelayError> {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return Ok(body.trim_end().to_string());
    };
    match value {
        Value::String(text) => Ok(text),
        Value::Object(map) => REPLY_FIELDS
            .iter()
            .find_map(|field| map.get(*field).and_then(Value::as_str))
            .map(str::to_string)
            .ok_or_else(|| {
                RelayError::InvalidResponse(format!(
                    "expected one of `{}` in response object",
                    REPLY_FIELDS.join("`, `")
                ))
            }),
        other => Err(RelayError::InvalidResponse(format!(
            "unexpected JSON reply: {other}"
        ))),
    }
}
