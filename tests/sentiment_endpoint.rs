//! Integration tests for the HTTP sentiment provider.
//!
//! A stub inference endpoint runs on a background runtime while the blocking
//! provider is driven from the test thread, the same split the binary uses.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    routing::post,
};
use secrecy::SecretString;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::runtime::Runtime;

use support_triage::config::TriageConfig;
use support_triage::error::SentimentError;
use support_triage::triage::TriageEngine;
use support_triage::triage::sentiment::{
    HttpSentimentConfig, HttpSentimentProvider, SentimentProvider,
};
use support_triage::triage::types::{EmailText, Sentiment};

/// Requests seen by the stub: `(authorization header, JSON body)`.
type Seen = Arc<Mutex<Vec<(Option<String>, Value)>>>;

async fn classify(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    seen.lock().unwrap().push((auth, body));
    Json(json!([[
        {"label": "LABEL_2", "score": 0.8123},
        {"label": "LABEL_1", "score": 0.15},
        {"label": "LABEL_0", "score": 0.0377}
    ]]))
}

async fn unavailable() -> (StatusCode, &'static str) {
    (StatusCode::SERVICE_UNAVAILABLE, "model is loading")
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(2)).await;
    Json(json!([{"label": "LABEL_2", "score": 1.0}]))
}

/// Serve `app` on a random port. The runtime must outlive the test.
fn start_stub(app: Router) -> (Runtime, String) {
    let runtime = Runtime::new().unwrap();
    let listener = runtime
        .block_on(TcpListener::bind("127.0.0.1:0"))
        .unwrap();
    let port = listener.local_addr().unwrap().port();
    runtime.spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (runtime, format!("http://127.0.0.1:{port}"))
}

fn provider(endpoint: String, token: Option<&str>, timeout: Duration) -> HttpSentimentProvider {
    HttpSentimentProvider::new(HttpSentimentConfig {
        endpoint,
        api_token: token.map(|t| SecretString::from(t.to_string())),
        timeout,
    })
    .unwrap()
}

#[test]
fn sends_inputs_with_bearer_token() {
    let seen: Seen = Arc::default();
    let app = Router::new()
        .route("/classify", post(classify))
        .with_state(Arc::clone(&seen));
    let (_runtime, base) = start_stub(app);

    let provider = provider(
        format!("{base}/classify"),
        Some("hf_test_token"),
        Duration::from_secs(5),
    );
    let scores = provider.score("Everything works, thank you!").unwrap();
    assert_eq!(scores.top(), (Sentiment::Positive, 0.812));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0.as_deref(), Some("Bearer hf_test_token"));
    assert_eq!(seen[0].1, json!({"inputs": "Everything works, thank you!"}));
}

#[test]
fn omits_authorization_without_token() {
    let seen: Seen = Arc::default();
    let app = Router::new()
        .route("/classify", post(classify))
        .with_state(Arc::clone(&seen));
    let (_runtime, base) = start_stub(app);

    provider(format!("{base}/classify"), None, Duration::from_secs(5))
        .score("hello")
        .unwrap();
    assert_eq!(seen.lock().unwrap()[0].0, None);
}

#[test]
fn engine_reports_model_score() {
    let seen: Seen = Arc::default();
    let app = Router::new()
        .route("/classify", post(classify))
        .with_state(Arc::clone(&seen));
    let (_runtime, base) = start_stub(app);

    let model: Arc<dyn SentimentProvider> = Arc::new(provider(
        format!("{base}/classify"),
        None,
        Duration::from_secs(5),
    ));
    let engine = TriageEngine::from_config(&TriageConfig::default(), Some(model));
    let result = engine.analyze(&EmailText::new("Broken", "error error"));
    assert_eq!(result.sentiment, Sentiment::Positive);
    assert_eq!(result.sentiment_score, Some(0.812));

    // Subject and body are sent as written.
    assert_eq!(seen.lock().unwrap()[0].1, json!({"inputs": "Broken error error"}));
}

#[test]
fn service_unavailable_is_request_failure() {
    let app = Router::new().route("/classify", post(unavailable));
    let (_runtime, base) = start_stub(app);

    let err = provider(format!("{base}/classify"), None, Duration::from_secs(5))
        .score("hello")
        .unwrap_err();
    assert!(matches!(err, SentimentError::RequestFailed { .. }), "{err}");
}

#[test]
fn engine_falls_back_when_endpoint_unavailable() {
    let app = Router::new().route("/classify", post(unavailable));
    let (_runtime, base) = start_stub(app);

    let model: Arc<dyn SentimentProvider> = Arc::new(provider(
        format!("{base}/classify"),
        None,
        Duration::from_secs(5),
    ));
    let engine = TriageEngine::from_config(&TriageConfig::default(), Some(model));
    let result = engine.analyze(&EmailText::new("Thanks", "Great job, I love it"));
    assert_eq!(result.sentiment, Sentiment::Positive);
    assert_eq!(result.sentiment_score, None);
}

#[test]
fn engine_falls_back_on_timeout() {
    let app = Router::new().route("/classify", post(slow));
    let (_runtime, base) = start_stub(app);

    let model: Arc<dyn SentimentProvider> = Arc::new(provider(
        format!("{base}/classify"),
        None,
        Duration::from_millis(200),
    ));
    let engine = TriageEngine::from_config(&TriageConfig::default(), Some(model));
    let result = engine.analyze(&EmailText::new("Login", "This is broken and I am frustrated"));
    assert_eq!(result.sentiment, Sentiment::Negative);
    assert_eq!(result.sentiment_score, None);
}
