//! HTTP gateway: `GET /summarize-url` and `GET /summarize-art-attention` → JSON summaries.
//!
//! Each request is bounded by a timeout; expiry aborts the whole pending batch (504).
//! Platform failures map to 502, a rejected permalink (strict policy) to 400.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use crate::error::SummarizerError;
use crate::summarizer::{Summarizer, SummaryResult};

/// Default timeout for one request (a batch includes paced collection + inference).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 600;

/// Query string for `GET /summarize-url`.
#[derive(Debug, Deserialize)]
pub struct SummarizeUrlQuery {
    /// Slack message permalink.
    pub url: String,
}

/// Response body for `GET /summarize-url`.
#[derive(Debug, Serialize)]
pub struct SummarizeUrlResponse {
    /// `null` when the model could not summarize the thread.
    pub summary: Option<String>,
}

/// Response body for the batch route.
#[derive(Debug, Serialize)]
pub struct LabeledSummariesResponse {
    pub summaries: Vec<SummaryResult>,
}

/// Shared state for the HTTP server: summarizer + per-request timeout.
#[derive(Clone)]
pub struct GatewayState {
    pub summarizer: Arc<Summarizer>,
    pub request_timeout_secs: u64,
}

/// Response body for gateway health endpoint.
#[derive(Debug, Serialize)]
pub struct GatewayHealthResponse {
    pub status: &'static str,
    pub request_timeout_secs: u64,
    pub inference_endpoint: String,
    pub failure_policy: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_concurrent_inference: Option<usize>,
}

type GatewayError = (StatusCode, String);

fn map_summarizer_error(error: &SummarizerError) -> GatewayError {
    let status = match error {
        SummarizerError::InvalidPermalink(_) => StatusCode::BAD_REQUEST,
        _ if error.is_platform_error() => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, error.to_string())
}

async fn with_request_timeout<T>(
    timeout_secs: u64,
    future: impl Future<Output = Result<T, SummarizerError>>,
) -> Result<T, GatewayError> {
    match tokio::time::timeout(Duration::from_secs(timeout_secs), future).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(error)) => {
            tracing::warn!(
                event = "gateway.request.failed",
                error = %error,
                "summarization request failed"
            );
            Err(map_summarizer_error(&error))
        }
        Err(_) => Err((
            StatusCode::GATEWAY_TIMEOUT,
            format!("summarization timed out after {timeout_secs}s"),
        )),
    }
}

async fn handle_summarize_url(
    State(state): State<GatewayState>,
    Query(query): Query<SummarizeUrlQuery>,
) -> Result<Json<SummarizeUrlResponse>, GatewayError> {
    let url = query.url.trim();
    if url.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "url must be non-empty".to_string()));
    }
    let result = with_request_timeout(
        state.request_timeout_secs,
        state.summarizer.summarize_by_permalink(url),
    )
    .await?;
    Ok(Json(SummarizeUrlResponse {
        summary: result.summary,
    }))
}

async fn handle_summarize_labeled(
    State(state): State<GatewayState>,
) -> Result<Json<LabeledSummariesResponse>, GatewayError> {
    let summaries = with_request_timeout(
        state.request_timeout_secs,
        state.summarizer.summarize_labeled_threads(),
    )
    .await?;
    Ok(Json(LabeledSummariesResponse { summaries }))
}

async fn handle_health(State(state): State<GatewayState>) -> Json<GatewayHealthResponse> {
    Json(GatewayHealthResponse {
        status: "healthy",
        request_timeout_secs: state.request_timeout_secs,
        inference_endpoint: state.summarizer.inference().endpoint().to_string(),
        failure_policy: state.summarizer.failure_policy().to_string(),
        max_concurrent_inference: state.summarizer.max_concurrent_inference(),
    })
}

/// Build the gateway router.
pub fn router(summarizer: Summarizer, request_timeout_secs: u64) -> Router {
    let state = GatewayState {
        summarizer: Arc::new(summarizer),
        request_timeout_secs,
    };
    Router::new()
        .route("/health", get(handle_health))
        .route("/summarize-url", get(handle_summarize_url))
        .route("/summarize-art-attention", get(handle_summarize_labeled))
        .with_state(state)
}

/// Run the HTTP server; binds to `bind_addr` (e.g. `0.0.0.0:8000`).
/// Graceful shutdown on Ctrl+C (SIGINT) and SIGTERM (Unix).
/// `request_timeout_secs`: per-request timeout (default 600 when None).
pub async fn run_http(
    summarizer: Summarizer,
    bind_addr: &str,
    request_timeout_secs: Option<u64>,
) -> Result<()> {
    let timeout = request_timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
    let app = router(summarizer, timeout);
    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!(
        "gateway listening on {} (request_timeout={}s, Ctrl+C/SIGTERM to stop)",
        bind_addr,
        timeout
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        let ctrl_c = tokio::signal::ctrl_c();
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(error) => {
                tracing::warn!(error = %error, "failed to listen for SIGTERM; Ctrl+C only");
                let _ = ctrl_c.await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %error, "failed to listen for Ctrl+C");
        }
    }
}
