//! Metrics for document upload, search and embedding.

use metrics::{counter, histogram};

pub struct DocumentMetrics;

impl DocumentMetrics {
    /// `documents_uploaded_total{outcome}`
    pub fn record_upload(success: bool) {
        counter!("documents_uploaded_total", "outcome" => outcome(success)).increment(1);
    }

    /// `document_searches_total{outcome}`; on success also `search_matches`.
    pub fn record_search(matches: Option<usize>) {
        counter!(
            "document_searches_total",
            "outcome" => outcome(matches.is_some())
        )
        .increment(1);

        if let Some(count) = matches {
            histogram!("search_matches").record(count as f64);
        }
    }

    /// `embedding_duration_seconds{provider}`
    pub fn record_embedding(provider: &str, duration_secs: f64) {
        histogram!(
            "embedding_duration_seconds",
            "provider" => provider.to_string()
        )
        .record(duration_secs);

        tracing::trace!(provider, duration_secs, "Embedding computed");
    }
}

fn outcome(success: bool) -> &'static str {
    if success { "success" } else { "error" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_exporter_prometheus::PrometheusBuilder;

    #[test]
    fn test_document_metrics_are_rendered() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            DocumentMetrics::record_upload(true);
            DocumentMetrics::record_upload(false);
            DocumentMetrics::record_search(Some(3));
            DocumentMetrics::record_embedding("hashing", 0.002);
        });

        let rendered = handle.render();
        assert!(rendered.contains("documents_uploaded_total{outcome=\"success\"} 1"));
        assert!(rendered.contains("documents_uploaded_total{outcome=\"error\"} 1"));
        assert!(rendered.contains("document_searches_total{outcome=\"success\"} 1"));
        assert!(rendered.contains("search_matches"));
        assert!(rendered.contains("embedding_duration_seconds"));
    }

    #[test]
    fn test_failed_search_records_no_match_count() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || DocumentMetrics::record_search(None));

        let rendered = handle.render();
        assert!(rendered.contains("document_searches_total{outcome=\"error\"} 1"));
        assert!(!rendered.contains("search_matches"));
    }
}
