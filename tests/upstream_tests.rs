mod common;

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use axum::{
    Json, Router,
    extract::Query,
    http::StatusCode,
    routing::{get, post},
};
use common::{spawn_stub_server, upstream_config};
use serde_json::{Value, json};
use site_chat_backend::config::UpstreamMode;
use site_chat_backend::routes::build_app;
use site_chat_backend::services::normalizer::NO_REPLY;
use site_chat_backend::services::upstream::{UpstreamError, build_upstream};
use site_chat_backend::state::AppState;
use tokio::sync::Mutex;
use tower::util::ServiceExt;

async fn structured_stub(body: &'static str) -> String {
    let router = Router::new().route("/chat/completions", post(move || async move { body }));
    let addr = spawn_stub_server(router).await;
    format!("http://{addr}/chat/completions")
}

#[tokio::test]
async fn test_structured_client_sends_chat_completion_body() {
    let seen: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let seen_in_handler = seen.clone();
    let router = Router::new().route(
        "/chat/completions",
        post(move |Json(body): Json<Value>| {
            let seen = seen_in_handler.clone();
            async move {
                *seen.lock().await = Some(body);
                Json(json!({"choices": [{"message": {"content": " Hello there "}}]}))
            }
        }),
    );
    let addr = spawn_stub_server(router).await;
    let cfg = upstream_config(
        UpstreamMode::Structured,
        format!("http://{addr}/chat/completions"),
        Duration::from_secs(5),
    );

    let client = build_upstream(&cfg).unwrap();
    let reply = client.complete("persona", "  who is Dennis? ", "EN").await.unwrap();
    assert_eq!(reply, "Hello there");

    let body = seen.lock().await.clone().unwrap();
    assert_eq!(body["model"], "test-model");
    assert_eq!(body["max_tokens"], 400);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][0]["content"], "persona");
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(body["messages"][1]["content"], "who is Dennis?");
}

#[tokio::test]
async fn test_structured_client_normalizes_alternate_shapes() {
    let cases = [
        (r#"{"message":{"content":"x"}}"#, "x"),
        (r#"{"message":"y"}"#, "y"),
        (r#"{"reply":"z"}"#, "z"),
        (r#""w""#, "w"),
        ("plain text answer", "plain text answer"),
        ("", NO_REPLY),
    ];

    for (body, expected) in cases {
        let url = structured_stub(body).await;
        let cfg = upstream_config(UpstreamMode::Structured, url, Duration::from_secs(5));
        let reply = build_upstream(&cfg)
            .unwrap()
            .complete("persona", "question", "EN")
            .await
            .unwrap();
        assert_eq!(reply, expected, "body: {body}");
    }
}

#[tokio::test]
async fn test_flat_client_sends_query_and_model() {
    let seen: Arc<Mutex<Option<HashMap<String, String>>>> = Arc::new(Mutex::new(None));
    let seen_in_handler = seen.clone();
    let router = Router::new().route(
        "/ask",
        get(move |Query(params): Query<HashMap<String, String>>| {
            let seen = seen_in_handler.clone();
            async move {
                *seen.lock().await = Some(params);
                Json(json!({"response": "Dennis ist KI-Ingenieur."}))
            }
        }),
    );
    let addr = spawn_stub_server(router).await;
    let cfg = upstream_config(UpstreamMode::Flat, format!("http://{addr}/ask"), Duration::from_secs(5));

    let reply = build_upstream(&cfg)
        .unwrap()
        .complete("persona", "Wer ist Dennis?", "DE")
        .await
        .unwrap();
    assert_eq!(reply, "Dennis ist KI-Ingenieur.");

    let params = seen.lock().await.clone().unwrap();
    assert_eq!(params["model"], "test-model");
    let query = &params["query"];
    assert!(query.starts_with("persona"));
    assert!(query.contains("Language code: DE"));
    assert!(query.contains("User: Wer ist Dennis?"));
    assert!(query.ends_with("Assistant:"));
}

#[tokio::test]
async fn test_non_success_status_is_reported() {
    let router = Router::new().route(
        "/chat/completions",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let addr = spawn_stub_server(router).await;
    let cfg = upstream_config(
        UpstreamMode::Structured,
        format!("http://{addr}/chat/completions"),
        Duration::from_secs(5),
    );

    let err = build_upstream(&cfg)
        .unwrap()
        .complete("persona", "question", "EN")
        .await
        .unwrap_err();
    assert!(matches!(err, UpstreamError::Status(500)));
}

#[tokio::test]
async fn test_connection_refused_is_unreachable() {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let cfg = upstream_config(UpstreamMode::Flat, format!("http://{addr}/ask"), Duration::from_secs(5));
    let err = build_upstream(&cfg)
        .unwrap()
        .complete("persona", "question", "EN")
        .await
        .unwrap_err();
    assert!(matches!(err, UpstreamError::Unreachable(_)));
}

#[tokio::test]
async fn test_end_to_end_status_500_becomes_502() {
    let url = {
        let router = Router::new().route(
            "/chat/completions",
            post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let addr = spawn_stub_server(router).await;
        format!("http://{addr}/chat/completions")
    };
    let cfg = upstream_config(UpstreamMode::Structured, url, Duration::from_secs(5));
    let state = AppState::new(build_upstream(&cfg).unwrap());
    let app = build_app(Arc::new(state), None);

    let response = app
        .oneshot(
            axum::http::Request::builder()
                .method("POST")
                .uri("/chat")
                .header("content-type", "application/json")
                .body(axum::body::Body::from(r#"{"message": "Tell me about his car project"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["detail"], "AI service returned status 500");
}

#[tokio::test]
async fn test_hanging_upstream_times_out_as_bad_gateway() {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_in_handler = calls.clone();
    let router = Router::new().route(
        "/ask",
        get(move || {
            let calls = calls_in_handler.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_secs(10)).await;
                "too late"
            }
        }),
    );
    let addr = spawn_stub_server(router).await;
    let timeout = Duration::from_millis(300);
    let cfg = upstream_config(UpstreamMode::Flat, format!("http://{addr}/ask"), timeout);
    let app = build_app(Arc::new(AppState::new(build_upstream(&cfg).unwrap())), None);

    let started = Instant::now();
    let response = app
        .oneshot(
            axum::http::Request::builder()
                .method("POST")
                .uri("/chat")
                .header("content-type", "application/json")
                .body(axum::body::Body::from(r#"{"message": "What is Denarixx about?"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    let elapsed = started.elapsed();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(elapsed < timeout + Duration::from_secs(2), "took {elapsed:?}");
    // Single attempt, no retries.
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["detail"], "Error contacting AI service");
}
