//! HTTP endpoints for the triage engine.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::config::ServerConfig;
use crate::error::{Result, ServerError};
use crate::triage::TriageEngine;
use crate::triage::quick_reply::QUICK_REPLY_CONFIDENCE;
use crate::triage::types::{AnalysisResult, EmailText};

/// Service name reported by the health check.
const SERVICE_NAME: &str = "support-triage";

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<TriageEngine>,
}

/// Build the Axum router with the triage routes.
pub fn triage_routes(engine: Arc<TriageEngine>) -> Router {
    let state = AppState { engine };

    Router::new()
        .route("/health", get(health))
        .route("/api/analyze-email", post(analyze_email))
        .route("/api/generate-response", post(generate_response))
        .route("/generate-response", post(quick_reply))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until ctrl-c.
pub async fn serve(config: &ServerConfig, engine: Arc<TriageEngine>) -> Result<()> {
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!(addr = %addr, "Triage server started");

    axum::serve(listener, triage_routes(engine))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    info!("Triage server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": SERVICE_NAME
    }))
}

// ── Triage ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct AnalyzeResponse {
    #[serde(flatten)]
    result: AnalysisResult,
    success: bool,
}

async fn analyze_email(
    State(state): State<AppState>,
    payload: std::result::Result<Json<EmailText>, JsonRejection>,
) -> Response {
    let Json(email) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return bad_request(rejection),
    };
    let engine = Arc::clone(&state.engine);
    // The sentiment provider may block on network I/O.
    match tokio::task::spawn_blocking(move || engine.analyze(&email)).await {
        Ok(result) => (
            StatusCode::OK,
            Json(AnalyzeResponse {
                result,
                success: true,
            }),
        )
            .into_response(),
        Err(e) => internal_error("analyze", e),
    }
}

/// Absent and `null` fields take the defaults.
#[derive(Debug, Deserialize)]
struct GenerateRequest {
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    sentiment: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

async fn generate_response(
    State(state): State<AppState>,
    payload: std::result::Result<Json<GenerateRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return bad_request(rejection),
    };
    let body = request.body.unwrap_or_default();
    let sentiment = request.sentiment.unwrap_or_else(|| "neutral".to_string());
    let category = request.category.unwrap_or_else(|| "general".to_string());

    let engine = Arc::clone(&state.engine);
    let composed =
        tokio::task::spawn_blocking(move || engine.respond(&body, &sentiment, &category)).await;

    match composed {
        Ok(reply) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "ai_response": reply,
                "success": true
            })),
        )
            .into_response(),
        Err(e) => internal_error("generate-response", e),
    }
}

// ── Quick reply ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct QuickReplyRequest {
    #[serde(default)]
    email_content: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

async fn quick_reply(
    State(state): State<AppState>,
    payload: std::result::Result<Json<QuickReplyRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return bad_request(rejection),
    };
    let content = request.email_content.unwrap_or_default();
    if content.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "email_content is required"})),
        )
            .into_response();
    }
    let kind = request.kind.unwrap_or_else(|| "general".to_string());

    let reply = state.engine.quick_reply(&content, &kind);
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "generated_response": reply,
            "confidence": QUICK_REPLY_CONFIDENCE,
            "category": kind
        })),
    )
        .into_response()
}

fn bad_request(rejection: JsonRejection) -> Response {
    let message = rejection.body_text();
    warn!(error = %message, "Rejected request body");
    (
        rejection.status(),
        Json(serde_json::json!({"error": message})),
    )
        .into_response()
}

fn internal_error(operation: &str, e: tokio::task::JoinError) -> Response {
    error!(operation, error = %e, "Triage task failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({"error": e.to_string()})),
    )
        .into_response()
}
