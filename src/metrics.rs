//! Prometheus metrics for request outcomes and database latency.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::{debug, info};

// === Metric Name Constants ===

/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// HTTP requests counter metric name.
pub const METRIC_HTTP_REQUESTS: &str = "http_requests_total";
/// Database query latency metric name.
pub const METRIC_DB_QUERY_LATENCY: &str = "db_query_latency_ms";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );
    describe_histogram!(
        METRIC_DB_QUERY_LATENCY,
        "Database round-trip latency in milliseconds"
    );
    describe_counter!(
        METRIC_HTTP_REQUESTS,
        "Total HTTP requests by method, route and status"
    );

    debug!("Metrics initialized");
}

/// Install the Prometheus recorder and serve it on `addr`.
pub fn install_exporter(addr: SocketAddr) -> anyhow::Result<()> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;
    info!("Prometheus exporter listening on {}", addr);
    Ok(())
}

/// Record one finished HTTP request.
pub fn record_http_request(method: &str, route: &str, status: u16, start: Instant) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_HTTP_REQUEST_LATENCY, "route" => route.to_string()).record(latency_ms);
    counter!(
        METRIC_HTTP_REQUESTS,
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// RAII guard for timing operations.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    metric_name: &'static str,
    query: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given metric and query label.
    pub fn new(metric_name: &'static str, query: &'static str) -> Self {
        Self {
            start: Instant::now(),
            metric_name,
            query,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        let latency_ms = self.elapsed_ms();
        histogram!(self.metric_name, "query" => self.query).record(latency_ms);
    }
}

/// Create a latency timer for a database round-trip.
pub fn timer_db(query: &'static str) -> LatencyTimer {
    LatencyTimer::new(METRIC_DB_QUERY_LATENCY, query)
}
