//! Prometheus metrics for the analytics service.
//!
//! Collectors are process-wide statics; [`init_metrics`] registers them with
//! [`PROMETHEUS_REGISTRY`] once at startup and [`gather_metrics`] renders the
//! text exposition format served on `/metrics`.
//!
//! # Example
//! ```no_run
//! use meuchapa_support_hub::metrics::HTTP_REQUESTS_TOTAL;
//!
//! HTTP_REQUESTS_TOTAL
//!     .with_label_values(&["GET", "/health", "200"])
//!     .inc();
//! ```

mod middleware;

pub use middleware::track_metrics;

use lazy_static::lazy_static;
use prometheus::{Counter, CounterVec, Gauge, Histogram, HistogramOpts, HistogramVec, Opts, Registry};

lazy_static! {
    /// Global Prometheus registry for all metrics
    pub static ref PROMETHEUS_REGISTRY: Registry = Registry::new();

    // ============================================================================
    // HTTP Metrics
    // ============================================================================

    /// Labels: method, path, status_code
    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests")
            .namespace("meuchapa"),
        &["method", "path", "status_code"]
    ).expect("Failed to create HTTP_REQUESTS_TOTAL metric");

    /// Labels: method, path
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new("http_request_duration_seconds", "HTTP request latency in seconds")
            .namespace("meuchapa")
            .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]),
        &["method", "path"]
    ).expect("Failed to create HTTP_REQUEST_DURATION_SECONDS metric");

    // ============================================================================
    // SLA Engine Metrics
    // ============================================================================

    /// Labels: role
    pub static ref SLA_REPORTS_GENERATED_TOTAL: CounterVec = CounterVec::new(
        Opts::new("sla_reports_generated_total", "SLA reports computed from the ticket source")
            .namespace("meuchapa"),
        &["role"]
    ).expect("Failed to create SLA_REPORTS_GENERATED_TOTAL metric");

    pub static ref SLA_REPORT_CACHE_HITS_TOTAL: Counter = Counter::with_opts(
        Opts::new("sla_report_cache_hits_total", "SLA reports served from the report cache")
            .namespace("meuchapa")
    ).expect("Failed to create SLA_REPORT_CACHE_HITS_TOTAL metric");

    pub static ref SLA_COMPUTATION_DURATION_SECONDS: Histogram = Histogram::with_opts(
        HistogramOpts::new("sla_computation_duration_seconds", "Time spent aggregating SLA metrics")
            .namespace("meuchapa")
            .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5])
    ).expect("Failed to create SLA_COMPUTATION_DURATION_SECONDS metric");

    /// Visible tickets in the most recently computed report
    pub static ref SLA_WINDOW_TICKETS: Gauge = Gauge::with_opts(
        Opts::new("sla_window_tickets", "Tickets aggregated by the last SLA report")
            .namespace("meuchapa")
    ).expect("Failed to create SLA_WINDOW_TICKETS metric");

    pub static ref TICKETS_IMPORTED_TOTAL: Counter = Counter::with_opts(
        Opts::new("tickets_imported_total", "Tickets loaded through snapshot imports")
            .namespace("meuchapa")
    ).expect("Failed to create TICKETS_IMPORTED_TOTAL metric");
}

/// Register every collector with the global registry.
///
/// Fails with `AlreadyReg` when called twice in the same process.
pub fn init_metrics() -> Result<(), prometheus::Error> {
    PROMETHEUS_REGISTRY.register(Box::new(HTTP_REQUESTS_TOTAL.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(SLA_REPORTS_GENERATED_TOTAL.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(SLA_REPORT_CACHE_HITS_TOTAL.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(SLA_COMPUTATION_DURATION_SECONDS.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(SLA_WINDOW_TICKETS.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(TICKETS_IMPORTED_TOTAL.clone()))?;

    tracing::debug!("Prometheus collectors registered");
    Ok(())
}

/// Gather all metrics in Prometheus text format
pub fn gather_metrics() -> String {
    use prometheus::Encoder;
    let encoder = prometheus::TextEncoder::new();
    let metric_families = PROMETHEUS_REGISTRY.gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::from("# Error encoding metrics\n");
    }

    String::from_utf8(buffer).unwrap_or_else(|e| {
        tracing::error!("Failed to convert metrics to string: {}", e);
        String::from("# Error converting metrics\n")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_initialization() {
        // The registry is global, a second registration is expected to fail
        let _ = init_metrics();
        assert!(init_metrics().is_err());
    }

    #[test]
    fn test_sla_counters() {
        let _ = init_metrics();
        let before = SLA_REPORTS_GENERATED_TOTAL.with_label_values(&["admin"]).get();
        SLA_REPORTS_GENERATED_TOTAL.with_label_values(&["admin"]).inc();
        assert_eq!(
            SLA_REPORTS_GENERATED_TOTAL.with_label_values(&["admin"]).get(),
            before + 1.0
        );

        let output = gather_metrics();
        assert!(output.contains("meuchapa_sla_reports_generated_total"));
    }
}
