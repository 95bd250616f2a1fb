//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define router metrics (requests, dispatch latency)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `router_requests_total` (counter): requests by method, outcome
//! - `router_dispatch_duration_seconds` (histogram): time spent in dispatch,
//!   handler included, by outcome
//!
//! # Design Decisions
//! - Low-overhead metric updates (atomic operations)
//! - Recording is a no-op until an exporter is installed
//! - Outcome labels: `matched`, `not_found`, `method_not_allowed`
//! - Method labels: the nine standard methods, upper-cased, else `OTHER`

use std::net::SocketAddr;
use std::time::Instant;

use axum::http::Method;
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::routing::router::canonical;

/// Install the Prometheus exporter, serving scrapes on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Label value for a request method.
pub fn method_label(method: &Method) -> &'static str {
    match canonical(method) {
        Method::GET => "GET",
        Method::POST => "POST",
        Method::PUT => "PUT",
        Method::PATCH => "PATCH",
        Method::DELETE => "DELETE",
        Method::HEAD => "HEAD",
        Method::OPTIONS => "OPTIONS",
        Method::CONNECT => "CONNECT",
        Method::TRACE => "TRACE",
        _ => "OTHER",
    }
}

/// Record one dispatched request.
pub fn record_dispatch(method: &Method, outcome: &'static str, started: Instant) {
    metrics::counter!(
        "router_requests_total",
        "method" => method_label(method),
        "outcome" => outcome
    )
    .increment(1);

    metrics::histogram!("router_dispatch_duration_seconds", "outcome" => outcome)
        .record(started.elapsed().as_secs_f64());
}
