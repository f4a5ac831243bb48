//! Prometheus metrics for the document search service.
//!
//! - process-wide recorder and `/metrics` handler
//! - per-request HTTP metrics middleware
//! - [`DocumentMetrics`] for upload, search and embedding operations
//!
//! ```rust,ignore
//! use observability::{init_metrics, metrics_handler, metrics_middleware};
//!
//! init_metrics()?;
//! let app = Router::new()
//!     .route("/metrics", get(metrics_handler))
//!     .layer(axum::middleware::from_fn(metrics_middleware));
//! ```

pub mod documents;
pub mod middleware;

pub use documents::DocumentMetrics;
pub use metrics_exporter_prometheus::BuildError;
pub use middleware::metrics_middleware;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::info;

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the global Prometheus recorder. Later calls return the same handle.
pub fn init_metrics() -> Result<&'static PrometheusHandle, BuildError> {
    METRICS_HANDLE.get_or_try_init(|| {
        let handle = PrometheusBuilder::new().install_recorder()?;
        info!("Prometheus metrics recorder initialized");
        register_metric_descriptions();
        Ok(handle)
    })
}

pub fn get_metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

/// Axum handler for `GET /metrics`.
pub async fn metrics_handler() -> String {
    match get_metrics_handle() {
        Some(handle) => handle.render(),
        None => "# Metrics not initialized\n".to_string(),
    }
}

fn register_metric_descriptions() {
    use metrics::{describe_counter, describe_histogram};

    describe_counter!("http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_counter!(
        "http_requests_errors_total",
        "Total number of HTTP requests answered with 4xx or 5xx"
    );

    describe_counter!(
        "documents_uploaded_total",
        "Document uploads by outcome"
    );
    describe_counter!(
        "document_searches_total",
        "Similarity searches by outcome"
    );
    describe_histogram!(
        "embedding_duration_seconds",
        "Time spent computing one embedding, by provider"
    );
    describe_histogram!("search_matches", "Number of matches returned per search");
}
