//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define site metrics (requests, latency)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `cdroot_requests_total` (counter): requests by action and envelope state
//! - `cdroot_request_duration_seconds` (histogram): latency by action
//!
//! # Design Decisions
//! - Recording without an installed exporter is a no-op
//! - Labels limited to the closed action set plus "unknown"

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`. Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "failed to install metrics exporter"),
    }
}

/// Record one answered request.
pub fn record_request(action: &str, state: u16, start: Instant) {
    let action = action.to_string();
    metrics::counter!(
        "cdroot_requests_total",
        "action" => action.clone(),
        "state" => state.to_string()
    )
    .increment(1);
    metrics::histogram!("cdroot_request_duration_seconds", "action" => action)
        .record(start.elapsed().as_secs_f64());
}
