//! Prometheus metrics for request counting and latency tracking.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::error::AppError;

// === Metric Name Constants ===

/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// HTTP requests counter metric name.
pub const METRIC_HTTP_REQUESTS: &str = "http_requests_total";
/// Sum validation failures counter metric name.
pub const METRIC_SUM_VALIDATION_FAILURES: &str = "sum_validation_failures_total";

/// Initialize all metric descriptions.
/// Call this once at startup, after the recorder is installed.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );
    describe_counter!(METRIC_HTTP_REQUESTS, "Total number of HTTP requests handled");
    describe_counter!(
        METRIC_SUM_VALIDATION_FAILURES,
        "Total number of rejected sum requests"
    );

    debug!("Metrics initialized");
}

/// Install the global Prometheus recorder and return a handle for rendering.
pub fn install_recorder() -> Result<PrometheusHandle, AppError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Increment the request counter for an endpoint.
pub fn inc_http_requests(endpoint: &'static str, status: u16) {
    counter!(METRIC_HTTP_REQUESTS, "endpoint" => endpoint, "status" => status.to_string())
        .increment(1);
}

/// Increment the sum validation failure counter.
pub fn inc_sum_validation_failures(reason: &'static str) {
    counter!(METRIC_SUM_VALIDATION_FAILURES, "reason" => reason).increment(1);
}

/// RAII guard for timing a request.
/// Records latency and the request count when dropped.
pub struct RequestTimer {
    start: Instant,
    endpoint: &'static str,
    status: u16,
}

impl RequestTimer {
    /// Start timing a request to `endpoint`. Status defaults to 200.
    pub fn new(endpoint: &'static str) -> Self {
        Self {
            start: Instant::now(),
            endpoint,
            status: 200,
        }
    }

    /// Set the status code recorded on drop.
    pub fn set_status(&mut self, status: u16) {
        self.status = status;
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for RequestTimer {
    fn drop(&mut self) {
        histogram!(METRIC_HTTP_REQUEST_LATENCY, "endpoint" => self.endpoint)
            .record(self.elapsed_ms());
        inc_http_requests(self.endpoint, self.status);
    }
}
