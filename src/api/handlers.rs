//! HTTP API handlers.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::metrics::{inc_sum_validation_failures, RequestTimer};
use crate::sum::{total as sum_total, Total};

/// Greeting returned by the root endpoint.
pub const GREETING: &str = "Hello from jenkins-demo-app";

/// Echo value used when `message` is absent or empty.
pub const EMPTY_ECHO: &str = "empty";

/// Application state shared with handlers.
///
/// Read-only after startup; handlers keep no per-request state here.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Prometheus render handle, present when metrics are enabled.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state without metrics exposure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create app state that serves `/metrics` from `handle`.
    pub fn with_metrics(handle: PrometheusHandle) -> Self {
        Self {
            metrics: Some(handle),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Greeting response.
#[derive(Debug, Serialize)]
pub struct GreetingResponse {
    /// Fixed greeting.
    pub message: &'static str,
}

/// Echo response.
#[derive(Debug, Serialize)]
pub struct EchoResponse {
    /// The caller's message, or "empty".
    pub echo: String,
}

/// Sum response.
#[derive(Debug, Serialize)]
pub struct SumResponse {
    /// Sum of all numbers.
    pub total: Total,
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    let _timer = RequestTimer::new("healthz");
    Json(HealthResponse { status: "ok" })
}

/// Root handler - fixed greeting.
pub async fn greeting() -> impl IntoResponse {
    let _timer = RequestTimer::new("root");
    Json(GreetingResponse { message: GREETING })
}

/// Echo handler - returns the `message` query parameter.
pub async fn echo(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    let _timer = RequestTimer::new("echo");
    let echo = params
        .get("message")
        .filter(|m| !m.is_empty())
        .cloned()
        .unwrap_or_else(|| EMPTY_ECHO.to_string());
    debug!(%echo, "echo");
    Json(EchoResponse { echo })
}

/// Sum handler - validates `numbers` and returns their total.
///
/// Bodies without a JSON content type, and empty bodies, are treated as
/// carrying no `numbers` field.
pub async fn sum(headers: HeaderMap, body: Bytes) -> Result<Json<SumResponse>, ApiError> {
    let mut timer = RequestTimer::new("sum");
    let result = sum_body(&headers, &body);
    if let Err(e) = &result {
        timer.set_status(e.status().as_u16());
    }
    result
}

fn sum_body(headers: &HeaderMap, body: &[u8]) -> Result<Json<SumResponse>, ApiError> {
    let payload = if has_json_content_type(headers) && !body.is_empty() {
        serde_json::from_slice::<Value>(body).map_err(|e| {
            warn!(error = %e, "malformed sum request body");
            ApiError::MalformedBody(format!("malformed JSON body: {e}"))
        })?
    } else {
        Value::Null
    };

    let numbers = payload.get("numbers");
    let total = sum_total(numbers).map_err(|e| {
        warn!(reason = e.reason(), "rejected sum request");
        inc_sum_validation_failures(e.reason());
        e
    })?;

    debug!(total, "sum computed");
    Ok(Json(SumResponse {
        total: Total(total),
    }))
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Prometheus scrape handler. 404 when metrics are disabled.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    match state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, String::new()),
    }
}
