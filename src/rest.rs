// Copyright 2026 Faleproxy Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP REST API for Faleproxy.
//!
//! `POST /fetch` is the one real operation: fetch a remote page, rewrite
//! its visible text, and return the result. `GET /` serves the embedded
//! frontend and `GET /health` reports liveness.

use crate::fetch::HttpClient;
use crate::rewrite::Rewriter;
use crate::substitute::Substitution;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

/// Shared state for all request handlers.
///
/// Constructed once at startup and shared immutably behind `Arc`; each
/// request carries its own document tree end-to-end, so there is no
/// per-request mutable state here.
pub struct AppState {
    pub started_at: Instant,
    pub client: HttpClient,
    pub rewriter: Rewriter,
}

impl AppState {
    /// Build the state for a word pair, validating it up front.
    pub fn new(target: &str, replacement: &str, timeout_ms: u64) -> anyhow::Result<Self> {
        Ok(Self {
            started_at: Instant::now(),
            client: HttpClient::new(timeout_ms),
            rewriter: Rewriter::new(Substitution::new(target, replacement)?),
        })
    }
}

/// Request body for `POST /fetch`.
#[derive(Debug, Default, Deserialize)]
pub struct FetchRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// Success payload for `POST /fetch`.
#[derive(Debug, Serialize)]
pub struct FetchResponse {
    pub success: bool,
    pub content: String,
    pub title: String,
    #[serde(rename = "originalUrl")]
    pub original_url: String,
}

/// Request-terminal failures, rendered as `{ "error": <message> }`.
///
/// Past input validation the API does not distinguish a fetch failure
/// from an unexpected internal one; both surface with the same prefix.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("URL is required")]
    MissingUrl,

    #[error("Failed to fetch content: {0}")]
    Fetch(String),

    #[error("Failed to fetch content: {0}")]
    Internal(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingUrl => StatusCode::BAD_REQUEST,
            ApiError::Fetch(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::MissingUrl => {}
            ApiError::Fetch(detail) => warn!("fetch failed: {detail}"),
            ApiError::Internal(detail) => tracing::error!("internal failure: {detail}"),
        }

        let status = self.status_code();
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Build the axum Router with all endpoints.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/fetch", post(handle_fetch))
        .layer(cors)
        .with_state(state)
}

/// Start the REST API server on the given port.
pub async fn start(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = router(state);
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));
    info!("Faleproxy listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

// ── Handlers ────────────────────────────────────────────────────

/// Serve the embedded frontend HTML.
async fn index() -> impl IntoResponse {
    Html(include_str!("index.html"))
}

async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_seconds": state.started_at.elapsed().as_secs(),
    }))
}

/// Fetch a remote page and rewrite its visible text.
///
/// A missing URL is rejected before any network access. Fetch failures
/// and unexpected rewrite failures are both terminal: no partial result
/// is ever returned.
async fn handle_fetch(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FetchRequest>,
) -> Result<Json<FetchResponse>, ApiError> {
    let url = match request.url.as_deref() {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => return Err(ApiError::MissingUrl),
    };

    let page = state
        .client
        .get(&url)
        .await
        .map_err(|e| ApiError::Fetch(format!("{e:#}")))?;

    info!("fetched {} ({} bytes)", page.final_url, page.body.len());

    // Parsing and traversal are synchronous CPU work; run them on the
    // blocking pool. A panicking parse surfaces here as a failure
    // instead of tearing down the connection.
    let rewriter = state.rewriter.clone();
    let rewritten = tokio::task::spawn_blocking(move || rewriter.rewrite(&page.body))
        .await
        .map_err(|e| ApiError::Internal(format!("rewrite task failed: {e}")))?;

    Ok(Json(FetchResponse {
        success: true,
        content: rewritten.content,
        title: rewritten.title,
        original_url: url,
    }))
}
