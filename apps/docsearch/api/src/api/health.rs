//! Readiness probe backed by the document store.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};
use domain_documents::DocumentStore;

use crate::state::AppState;

/// `GET /ready`: Redis answers `PING` and the vector index exists.
pub async fn ready_handler<S>(State(state): State<AppState<S>>) -> Response
where
    S: DocumentStore + Clone + 'static,
{
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![
        (
            "redis",
            Box::pin(async {
                state
                    .service
                    .check_store()
                    .await
                    .map_err(|e| format!("Redis ping failed: {}", e))
            }),
        ),
        (
            "index",
            Box::pin(async {
                state
                    .service
                    .check_index()
                    .await
                    .map_err(|e| e.to_string())
            }),
        ),
    ];

    run_health_checks(checks).await.into_response()
}
