//! Tests for the relay and direct transports and their failover.

mod test_utils;

use serde_json::json;
use sheetcraft_core::{GenerationRequest, MediaAttachment};
use sheetcraft_error::{FormatErrorKind, SheetcraftErrorKind, TransportErrorKind};
use sheetcraft_transport::{
    DIRECT_TEMPERATURE, FailoverTransport, GeminiClient, RelayClient, Transport,
};
use std::time::Duration;
use test_utils::{
    StubResponse, StubServer, create_test_request, direct_envelope, page_schema, unreachable_url,
};

const TIMEOUT: Duration = Duration::from_secs(5);

fn relay(base: &str) -> RelayClient {
    RelayClient::new(base, TIMEOUT).expect("relay client")
}

fn direct(base: &str, key: Option<&str>) -> GeminiClient {
    GeminiClient::new(base, key.map(String::from), DIRECT_TEMPERATURE, TIMEOUT)
        .expect("direct client")
}

#[tokio::test]
async fn test_relay_body_is_repaired_and_returned() -> anyhow::Result<()> {
    let relay_stub = StubServer::start(vec![StubResponse::ok(
        r#"```json
[{"title": "Farm", "items": [1, 2]}{"title": "Zoo", "items": [3]}]
```"#,
    )])
    .await;
    let direct_stub = StubServer::start(vec![]).await;

    let transport = FailoverTransport::new(
        Some(relay(&relay_stub.base_url)),
        direct(&direct_stub.base_url, Some("test-key")),
    );
    let value = transport.send(&create_test_request("Two pages")).await?;

    assert_eq!(
        value,
        json!([{"title": "Farm", "items": [1, 2]}, {"title": "Zoo", "items": [3]}])
    );

    let requests = relay_stub.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].request_line.starts_with("POST /api/generate"));
    let body = requests[0].json();
    assert_eq!(body["prompt"], "Two pages");
    assert_eq!(body["schema"]["type"], "ARRAY");
    assert_eq!(body["model"], "gemini-2.5-flash");
    assert_eq!(body["useSearch"], false);
    assert!(body.get("image").is_none());

    assert!(direct_stub.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_relay_error_status_falls_through_to_direct() -> anyhow::Result<()> {
    let relay_stub = StubServer::start(vec![StubResponse::status(502, "bad gateway")]).await;
    let direct_stub = StubServer::start(vec![StubResponse::ok(direct_envelope(
        r#"[{"title": "Direct", "items": [7]}]"#,
    ))])
    .await;

    let transport = FailoverTransport::new(
        Some(relay(&relay_stub.base_url)),
        direct(&direct_stub.base_url, Some("test-key")),
    );
    let value = transport.send(&create_test_request("One page")).await?;
    assert_eq!(value, json!([{"title": "Direct", "items": [7]}]));

    let requests = direct_stub.requests();
    assert_eq!(requests.len(), 1);
    assert!(
        requests[0]
            .request_line
            .starts_with("POST /models/gemini-2.5-flash:generateContent?key=test-key")
    );

    let body = requests[0].json();
    assert_eq!(body["contents"][0]["role"], "user");
    assert_eq!(body["contents"][0]["parts"][0]["text"], "One page");
    let config = &body["generationConfig"];
    assert!((config["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    assert_eq!(config["responseMimeType"], "application/json");
    assert_eq!(config["responseSchema"]["items"]["type"], "OBJECT");
    assert!(body.get("tools").is_none());
    Ok(())
}

#[tokio::test]
async fn test_unreachable_relay_falls_through() -> anyhow::Result<()> {
    let direct_stub = StubServer::start(vec![StubResponse::ok(direct_envelope(
        r#"[{"title": "Offline relay", "items": []}]"#,
    ))])
    .await;

    let transport = FailoverTransport::new(
        Some(relay(&unreachable_url().await)),
        direct(&direct_stub.base_url, Some("test-key")),
    );
    let value = transport.send(&create_test_request("page")).await?;
    assert_eq!(value[0]["title"], "Offline relay");
    Ok(())
}

#[tokio::test]
async fn test_empty_relay_body_falls_through() -> anyhow::Result<()> {
    let relay_stub = StubServer::start(vec![StubResponse::ok("  ")]).await;
    let direct_stub = StubServer::start(vec![StubResponse::ok(direct_envelope(
        r#"[{"title": "Filled", "items": [1]}]"#,
    ))])
    .await;

    let transport = FailoverTransport::new(
        Some(relay(&relay_stub.base_url)),
        direct(&direct_stub.base_url, Some("test-key")),
    );
    let value = transport.send(&create_test_request("page")).await?;
    assert_eq!(value[0]["title"], "Filled");
    Ok(())
}

#[tokio::test]
async fn test_unrecoverable_relay_body_does_not_fall_through() {
    let relay_stub = StubServer::start(vec![StubResponse::ok("I cannot do that.")]).await;
    let direct_stub = StubServer::start(vec![]).await;

    let transport = FailoverTransport::new(
        Some(relay(&relay_stub.base_url)),
        direct(&direct_stub.base_url, Some("test-key")),
    );
    let err = transport
        .send(&create_test_request("page"))
        .await
        .unwrap_err();

    match err.kind() {
        SheetcraftErrorKind::Format(e) => {
            assert_eq!(e.raw_text(), Some("I cannot do that."));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.is_recoverable());
    assert!(direct_stub.requests().is_empty());
}

#[tokio::test]
async fn test_direct_failure_is_not_retried() {
    let relay_stub = StubServer::start(vec![StubResponse::status(503, "down")]).await;
    let direct_stub = StubServer::start(vec![StubResponse::status(500, "boom")]).await;

    let transport = FailoverTransport::new(
        Some(relay(&relay_stub.base_url)),
        direct(&direct_stub.base_url, Some("test-key")),
    );
    let err = transport
        .send(&create_test_request("page"))
        .await
        .unwrap_err();

    match err.kind() {
        SheetcraftErrorKind::Transport(e) => assert!(matches!(
            e.kind,
            TransportErrorKind::HttpStatus {
                status_code: 500,
                ..
            }
        )),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(relay_stub.requests().len(), 1);
    assert_eq!(direct_stub.requests().len(), 1);
}

#[tokio::test]
async fn test_empty_direct_response_is_an_error() {
    let direct_stub = StubServer::start(vec![StubResponse::ok(direct_envelope(""))]).await;

    let transport = FailoverTransport::new(None, direct(&direct_stub.base_url, Some("k")));
    let err = transport
        .send(&create_test_request("page"))
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), SheetcraftErrorKind::EmptyResponse(_)));
    assert!(err.is_recoverable());
}

#[tokio::test]
async fn test_missing_api_key_is_recoverable() {
    let direct_stub = StubServer::start(vec![]).await;
    let transport = FailoverTransport::new(None, direct(&direct_stub.base_url, None));

    let err = transport
        .send(&create_test_request("page"))
        .await
        .unwrap_err();

    match err.kind() {
        SheetcraftErrorKind::Transport(e) => {
            assert_eq!(
                e.kind,
                TransportErrorKind::MissingApiKey("GEMINI_API_KEY".to_string())
            );
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.is_recoverable());
    assert!(direct_stub.requests().is_empty());
}

#[tokio::test]
async fn test_blocked_prompt() {
    let direct_stub = StubServer::start(vec![StubResponse::ok(
        json!({"candidates": [], "promptFeedback": {"blockReason": "SAFETY"}}).to_string(),
    )])
    .await;
    let transport = FailoverTransport::new(None, direct(&direct_stub.base_url, Some("k")));

    let err = transport
        .send(&create_test_request("page"))
        .await
        .unwrap_err();
    match err.kind() {
        SheetcraftErrorKind::Transport(e) => {
            assert_eq!(e.kind, TransportErrorKind::Blocked("SAFETY".to_string()))
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_schema_mismatch_fails_closed() {
    let relay_stub = StubServer::start(vec![StubResponse::ok(
        r#"[{"title": "Farm", "items": "one, two"}]"#,
    )])
    .await;
    let transport = FailoverTransport::new(
        Some(relay(&relay_stub.base_url)),
        direct(&relay_stub.base_url, Some("k")),
    );

    let err = transport
        .send(&create_test_request("page"))
        .await
        .unwrap_err();
    match err.kind() {
        SheetcraftErrorKind::Format(e) => match &e.kind {
            FormatErrorKind::SchemaMismatch { path, .. } => assert_eq!(path, "$[0].items"),
            other => panic!("unexpected format error: {other}"),
        },
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.is_recoverable());
}

#[tokio::test]
async fn test_media_travels_on_both_paths() -> anyhow::Result<()> {
    let relay_stub = StubServer::start(vec![StubResponse::status(500, "")]).await;
    let direct_stub = StubServer::start(vec![StubResponse::ok(direct_envelope(
        r#"[{"title": "Scanned", "items": [1]}]"#,
    ))])
    .await;

    let request = GenerationRequest::builder()
        .prompt_text("Recreate this worksheet")
        .schema(page_schema())
        .attached_media(MediaAttachment::new(vec![1u8, 2, 3], "image/png"))
        .build()?;

    let transport = FailoverTransport::new(
        Some(relay(&relay_stub.base_url)),
        direct(&direct_stub.base_url, Some("k")),
    );
    transport.send(&request).await?;

    let relay_body = relay_stub.requests()[0].json();
    assert_eq!(relay_body["image"], "AQID");
    assert_eq!(relay_body["mimeType"], "image/png");

    let direct_body = direct_stub.requests()[0].json();
    let parts = &direct_body["contents"][0]["parts"];
    assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
    assert_eq!(parts[0]["inlineData"]["data"], "AQID");
    assert_eq!(parts[1]["text"], "Recreate this worksheet");
    Ok(())
}

#[tokio::test]
async fn test_search_request_uses_tool_instead_of_schema() -> anyhow::Result<()> {
    let direct_stub = StubServer::start(vec![StubResponse::ok(direct_envelope(
        r#"[{"title": "News", "items": [2026]}]"#,
    ))])
    .await;

    let request = GenerationRequest::builder()
        .prompt_text("Current events")
        .schema(page_schema())
        .use_extended_search(true)
        .build()?;

    let transport = FailoverTransport::new(None, direct(&direct_stub.base_url, Some("k")));
    transport.send(&request).await?;

    let body = direct_stub.requests()[0].json();
    assert_eq!(body["tools"], json!([{"googleSearch": {}}]));
    assert!(body["generationConfig"].get("responseSchema").is_none());
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.starts_with("Current events"));
    assert!(prompt.contains("\"ARRAY\""));
    Ok(())
}
