//! Prometheus metrics endpoint
//!
//! Exposes relay metrics in Prometheus format for monitoring.

use axum::response::IntoResponse;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;

/// Global Prometheus handle for metrics export
static PROMETHEUS_HANDLE: Lazy<PrometheusHandle> = Lazy::new(|| {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
});

/// Initialize metrics (call once at startup)
pub fn init_metrics() {
    // Force initialization of the lazy static
    let _ = &*PROMETHEUS_HANDLE;

    metrics::describe_counter!(
        "relay_requests_total",
        "Total number of relay invocations by response status"
    );
    metrics::describe_histogram!(
        "relay_request_duration_seconds",
        "Relay invocation duration in seconds"
    );
}

/// Prometheus metrics endpoint handler
pub async fn prometheus_metrics() -> impl IntoResponse {
    PROMETHEUS_HANDLE.render()
}

/// Map a response status to a coarse outcome label
pub fn outcome_label(status: u16) -> &'static str {
    match status {
        204 => "preflight",
        200..=299 => "success",
        502 => "upstream_error",
        400..=499 => "rejected",
        _ => "error",
    }
}

/// Record one relay invocation
pub fn record_request(status: u16, duration_secs: f64) {
    metrics::counter!(
        "relay_requests_total",
        "outcome" => outcome_label(status),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("relay_request_duration_seconds").record(duration_secs);
}
