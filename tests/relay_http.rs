//! `HttpRelay` against a local scripted server.

mod support;

use chatline::api::{HttpRelay, MessageRelay};
use chatline::config::RelayTarget;
use chatline::error::RelayError;
use serde_json::json;
use std::time::Duration;
use support::{MockRelayServer, MockReply};

fn relay(
    server: &MockRelayServer,
    api_key: Option<&str>,
    timeout: Duration,
    retries: u32,
) -> HttpRelay {
    let target = RelayTarget {
        service: "mock".into(),
        endpoint: server.url("/chat"),
        api_key: api_key.map(str::to_string),
    };
    HttpRelay::new(&target, timeout, retries)
}

#[tokio::test]
async fn posts_message_json_and_reads_reply_field() {
    let server = MockRelayServer::start(vec![MockReply::json(json!({"reply": "pong"}))]);
    let relay = relay(&server, Some("k-123"), Duration::from_secs(5), 0);
    assert_eq!(relay.endpoint(), server.url("/chat"));

    let reply = relay.send("ping\nline two").await.unwrap();
    assert_eq!(reply, "pong");

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].head.starts_with("POST /chat "));
    assert_eq!(requests[0].json(), json!({"message": "ping\nline two"}));
    assert_eq!(
        requests[0].header("authorization").as_deref(),
        Some("Bearer k-123")
    );
}

#[tokio::test]
async fn no_key_means_no_authorization_header() {
    let server = MockRelayServer::start(vec![MockReply::json(json!({"text": "ok"}))]);
    let relay = relay(&server, None, Duration::from_secs(5), 0);
    assert_eq!(relay.send("hi").await.unwrap(), "ok");
    assert_eq!(server.requests()[0].header("authorization"), None);
}

#[tokio::test]
async fn plain_text_body_is_accepted() {
    let server = MockRelayServer::start(vec![MockReply::text(200, "just text\n")]);
    let relay = relay(&server, None, Duration::from_secs(5), 0);
    assert_eq!(relay.send("hi").await.unwrap(), "just text");
}

#[tokio::test]
async fn error_status_is_not_retried() {
    let server = MockRelayServer::start(vec![
        MockReply::text(503, "overloaded"),
        MockReply::json(json!({"reply": "late"})),
    ]);
    let relay = relay(&server, None, Duration::from_secs(5), 3);

    let err = relay.send("hi").await.unwrap_err();
    match err {
        RelayError::Status(code, body) => {
            assert_eq!(code, 503);
            assert_eq!(body, "overloaded");
        }
        other => panic!("expected status error, got {other}"),
    }
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn timeout_is_retried() {
    let server = MockRelayServer::start(vec![
        MockReply::json(json!({"reply": "slow"})).delayed(Duration::from_millis(800)),
        MockReply::json(json!({"reply": "fast"})),
    ]);
    let relay = relay(&server, None, Duration::from_millis(250), 1);

    assert_eq!(relay.send("hi").await.unwrap(), "fast");
    assert_eq!(server.requests().len(), 2);
}

#[tokio::test]
async fn timeout_without_retries_is_reported() {
    let server = MockRelayServer::start(vec![
        MockReply::json(json!({"reply": "slow"})).delayed(Duration::from_millis(800)),
    ]);
    let relay = relay(&server, None, Duration::from_millis(250), 0);

    let err = relay.send("hi").await.unwrap_err();
    assert!(err.is_timeout(), "expected timeout, got {err}");
}

#[tokio::test]
async fn json_without_reply_field_is_invalid() {
    let server = MockRelayServer::start(vec![MockReply::json(json!({"status": "ok"}))]);
    let relay = relay(&server, None, Duration::from_secs(5), 0);
    assert!(matches!(
        relay.send("hi").await,
        Err(RelayError::InvalidResponse(_))
    ));
}
