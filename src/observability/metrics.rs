//! Metrics collection and exposition.
//!
//! # Metrics
//! - `bridge_requests_total` (counter): webhook requests by outcome
//! - `bridge_request_duration_seconds` (histogram): webhook latency
//! - `bridge_upstream_total` (counter): upstream calls by result and status
//!
//! # Design Decisions
//! - Low-overhead metric updates (atomic operations)
//! - Exposed on a dedicated listener so the service port stays clean

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own address.
///
/// Failure to install is logged, not fatal: the bridge keeps serving
/// without metrics.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one webhook request.
pub fn record_webhook(outcome: &str, start: Instant) {
    metrics::counter!("bridge_requests_total", "outcome" => outcome.to_string()).increment(1);
    metrics::histogram!("bridge_request_duration_seconds")
        .record(start.elapsed().as_secs_f64());
}

/// Record one upstream call result.
pub fn record_upstream(ok: bool, status: u16) {
    metrics::counter!(
        "bridge_upstream_total",
        "ok" => ok.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}
