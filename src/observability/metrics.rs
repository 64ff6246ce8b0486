//! Metrics collection and exposition.
//!
//! # Metrics
//! - `probe_requests_total` (counter): requests by route, status
//! - `probe_toggles_total` (counter): flag changes
//! - `probe_service_enabled` (gauge): 1=healthy, 0=unhealthy
//! - `probe_subscribers` (gauge): open streaming connections
//! - `probe_notify_failures_total` (counter): failed pushes to subscribers
//! - `probe_upgrade_failures_total` (counter): handshakes that failed after a 101 was due

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(route: &'static str, status: u16) {
    metrics::counter!("probe_requests_total", "route" => route, "status" => status.to_string())
        .increment(1);
}

pub fn record_flag(enabled: bool) {
    metrics::gauge!("probe_service_enabled").set(if enabled { 1.0 } else { 0.0 });
}

pub fn record_toggle() {
    metrics::counter!("probe_toggles_total").increment(1);
}

pub fn record_subscriber_added() {
    metrics::gauge!("probe_subscribers").increment(1.0);
}

pub fn record_subscriber_removed() {
    metrics::gauge!("probe_subscribers").decrement(1.0);
}

pub fn record_upgrade_failure() {
    metrics::counter!("probe_upgrade_failures_total").increment(1);
}

pub fn record_notify_failure() {
    metrics::counter!("probe_notify_failures_total").increment(1);
}
