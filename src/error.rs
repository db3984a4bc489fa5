//! Unified error types for the demo service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Process-level error: anything that stops the service from starting or serving.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Prometheus recorder could not be installed.
    #[error("metrics error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Validation failures of the sum endpoint.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SumError {
    /// `numbers` is missing or not a JSON array.
    #[error("numbers must be an array")]
    NotAnArray,

    /// At least one element of `numbers` is not a number.
    #[error("numbers must contain only numeric values")]
    NonNumeric,
}

impl SumError {
    /// Short label used for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            SumError::NotAnArray => "not_an_array",
            SumError::NonNumeric => "non_numeric",
        }
    }
}

/// Error returned by request handlers. Always rendered as `{"error": ...}`.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Sum request failed validation.
    #[error(transparent)]
    Sum(#[from] SumError),

    /// Request body claimed to be JSON but could not be parsed.
    #[error("{0}")]
    MalformedBody(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Sum(_) | ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;
