//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): inbound requests by route, status
//! - `relay_request_duration_seconds` (histogram): inbound latency by route
//! - `relay_telemetry_push_total` (counter): upstream pushes by source, outcome
//!
//! Without an installed recorder every call is a no-op.

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

use crate::telemetry::PushOutcome;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a completed inbound request.
pub fn record_request(route: &'static str, status: u16, start: Instant) {
    ::metrics::counter!(
        "relay_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!("relay_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Record the outcome of an upstream telemetry push.
pub fn record_push(source: &'static str, outcome: &'static str) {
    ::metrics::counter!(
        "relay_telemetry_push_total",
        "source" => source,
        "outcome" => outcome
    )
    .increment(1);
}

/// Outcome label for a push that received an HTTP response.
pub fn push_outcome_label(outcome: &PushOutcome) -> &'static str {
    if outcome.is_success() {
        "success"
    } else if (400..500).contains(&outcome.status) {
        "client_error"
    } else if outcome.status >= 500 {
        "server_error"
    } else {
        "unexpected_status"
    }
}
