//! Metrics collection and exposition.
//!
//! # Metrics
//! - `split_dispatch_total` (counter): dispatches by method, path, variant
//! - `split_anonymous_total` (counter): dispatches that fell back to the
//!   default variant because no identity token was present
//!
//! # Design Decisions
//! - Variant index is the label, never the user or token; no per-user
//!   assignment is recorded
//! - Recording is a no-op until an exporter is installed, so the library
//!   costs nothing in apps that don't opt in

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on `addr`. Call at most once, at
/// startup, when metrics are enabled.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one split dispatch.
pub fn record_dispatch(method: &str, path: &str, variant: usize, anonymous: bool) {
    metrics::counter!(
        "split_dispatch_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "variant" => variant.to_string()
    )
    .increment(1);

    if anonymous {
        metrics::counter!(
            "split_anonymous_total",
            "method" => method.to_string(),
            "path" => path.to_string()
        )
        .increment(1);
    }
}
