//! Router-level tests for the relay and feedback endpoints.
//!
//! Requests go through the full axum stack with an in-process mock model.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use serde_json::Value;
use tower::ServiceExt;

use chatrelay::{
    router, Container, ContainerConfig, GenerationConfig, MockGenerativeModel, ERROR_SENTINEL,
};

fn app_with(model: MockGenerativeModel) -> axum::Router {
    let container = Container::with_model(Arc::new(model), ContainerConfig::default());
    router(Arc::new(container))
}

fn post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(resp: Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse JSON")
}

#[tokio::test]
async fn chat_returns_completion_as_json_string() {
    let app = app_with(MockGenerativeModel::with_reply("Hello! How can I help?"));

    let resp = app
        .oneshot(post("/api/chat", r#"[{"role":"user","parts":[{"text":"hi"}]}]"#))
        .await
        .expect("request");

    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("application/json"));
    assert_eq!(json_body(resp).await, Value::String("Hello! How can I help?".into()));
}

#[tokio::test]
async fn chat_forwards_only_the_last_turn() {
    let model = MockGenerativeModel::new();
    let calls = model.calls();
    let app = app_with(model);

    let body = r#"[
        {"role":"user","parts":[{"text":"first"}]},
        {"role":"model","parts":[{"text":"answer"}]},
        {"role":"user","parts":[{"text":"second"}]}
    ]"#;
    let resp = app.oneshot(post("/api/chat", body)).await.expect("request");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, Value::String("You said: second".into()));

    let calls = calls.lock().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].message, "second");
    assert_eq!(calls[0].history.len(), 2);
}

#[tokio::test]
async fn chat_uses_configured_generation_settings() {
    let model = MockGenerativeModel::new();
    let calls = model.calls();
    let container = Container::with_model(
        Arc::new(model),
        ContainerConfig {
            generation: GenerationConfig::new("pirate persona", 12),
            ..Default::default()
        },
    );
    let app = router(Arc::new(container));

    app.oneshot(post("/api/chat", r#"[{"role":"user","parts":[{"text":"ahoy"}]}]"#))
        .await
        .expect("request");

    let calls = calls.lock().await;
    assert_eq!(calls[0].persona, "pirate persona");
    assert_eq!(calls[0].max_output_tokens, 12);
}

#[tokio::test]
async fn empty_transcript_yields_sentinel_with_ok_status() {
    let model = MockGenerativeModel::new();
    let calls = model.calls();
    let app = app_with(model);

    let resp = app.oneshot(post("/api/chat", "[]")).await.expect("request");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, Value::String(ERROR_SENTINEL.into()));
    assert!(calls.lock().await.is_empty());
}

#[tokio::test]
async fn malformed_bodies_yield_sentinel_with_ok_status() {
    for body in [
        "not json",
        r#"{"role":"user"}"#,
        r#"[{"role":"user","parts":[]}]"#,
        r#"[{"role":"user"}]"#,
    ] {
        let app = app_with(MockGenerativeModel::new());
        let resp = app.oneshot(post("/api/chat", body)).await.expect("request");

        assert_eq!(resp.status(), StatusCode::OK, "body: {body}");
        assert_eq!(
            json_body(resp).await,
            Value::String(ERROR_SENTINEL.into()),
            "body: {body}"
        );
    }
}

#[tokio::test]
async fn chat_accepts_transcripts_over_two_megabytes() {
    let model = MockGenerativeModel::with_reply("ok");
    let calls = model.calls();
    let app = app_with(model);

    let long_text = "a".repeat(3 * 1024 * 1024);
    let body = serde_json::json!([
        { "role": "user", "parts": [{ "text": "earlier" }] },
        { "role": "model", "parts": [{ "text": "reply" }] },
        { "role": "user", "parts": [{ "text": long_text }] }
    ])
    .to_string();
    assert!(body.len() > 2 * 1024 * 1024);

    let resp = app.oneshot(post("/api/chat", &body)).await.expect("request");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, Value::String("ok".into()));
    let calls = calls.lock().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].message.len(), 3 * 1024 * 1024);
}

#[tokio::test]
async fn provider_failure_yields_sentinel_with_ok_status() {
    let app = app_with(MockGenerativeModel::failing("upstream exploded"));

    let resp = app
        .oneshot(post("/api/chat", r#"[{"role":"user","parts":[{"text":"hi"}]}]"#))
        .await
        .expect("request");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, Value::String(ERROR_SENTINEL.into()));
}

#[tokio::test]
async fn feedback_accepts_ratings_in_range() {
    for rating in 1..=5 {
        let app = app_with(MockGenerativeModel::new());
        let body = format!(r#"{{"rating":{rating},"responseIndex":1}}"#);
        let resp = app.oneshot(post("/api/feedback", &body)).await.expect("request");
        assert_eq!(resp.status(), StatusCode::NO_CONTENT, "rating {rating}");
    }
}

#[tokio::test]
async fn feedback_rejects_out_of_range_and_malformed() {
    for body in [
        r#"{"rating":0,"responseIndex":1}"#,
        r#"{"rating":6,"responseIndex":1}"#,
        r#"{"rating":"five"}"#,
        "garbage",
    ] {
        let app = app_with(MockGenerativeModel::new());
        let resp = app.oneshot(post("/api/feedback", body)).await.expect("request");

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body: {body}");
        let json = json_body(resp).await;
        assert_eq!(json["error"], "validation_error");
        assert!(json["message"].is_string());
    }
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = app_with(MockGenerativeModel::new());
    let resp = app.oneshot(post("/api/missing", "[]")).await.expect("request");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
