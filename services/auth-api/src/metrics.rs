//! HTTP metrics for observability.
//!
//! Records per-route request counts and latencies through the `metrics`
//! facade; the Prometheus recorder installed at startup exposes them on
//! `GET /metrics`.
//!
//! - `http_requests_total` - Counter of requests by method, path, status
//! - `http_request_duration_seconds` - Histogram of request latencies

use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};

/// Metric name for total requests.
pub const REQUESTS_TOTAL: &str = "http_requests_total";

/// Metric name for request duration histogram.
pub const REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";

/// Install the Prometheus recorder and register metric descriptions.
pub fn setup_metrics() -> anyhow::Result<PrometheusHandle> {
    // Auth operations are dominated by argon2 verification on login,
    // so the buckets reach further than a typical read path would
    let latency_buckets = &[0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5];

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(REQUEST_DURATION_SECONDS.to_string()),
            latency_buckets,
        )?
        .install_recorder()?;

    metrics::describe_counter!(
        REQUESTS_TOTAL,
        "Total HTTP requests by method, path, and status"
    );
    metrics::describe_histogram!(
        REQUEST_DURATION_SECONDS,
        "HTTP request latency in seconds by method and path"
    );

    Ok(handle)
}

/// Middleware recording count and latency for every matched route.
///
/// Uses the matched route template rather than the raw URI so path
/// parameters do not explode label cardinality.
pub async fn track_http(request: Request, next: Next) -> Response {
    let start = Instant::now();

    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let method = request.method().to_string();

    let response = next.run(request).await;

    let status = response.status().as_u16().to_string();
    let elapsed = start.elapsed().as_secs_f64();

    counter!(
        REQUESTS_TOTAL,
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status
    )
    .increment(1);

    histogram!(
        REQUEST_DURATION_SECONDS,
        "method" => method,
        "path" => path
    )
    .record(elapsed);

    response
}
