use axum::{Router, middleware, routing::get};
use axum_helpers::server::{create_router, health_router};
use domain_documents::{DocumentStore, handlers};
use observability::{metrics_handler, metrics_middleware};
use std::io;

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod health;

/// Document routes at the root: `/upload/` and `/search/`.
pub fn routes<S>(state: &AppState<S>) -> Router
where
    S: DocumentStore + Clone + 'static,
{
    handlers::router(state.service.clone(), state.config.documents.upload_max_bytes)
}

/// `/ready` with the store and index checks.
pub fn ready_router<S>(state: AppState<S>) -> Router
where
    S: DocumentStore + Clone + 'static,
{
    Router::new()
        .route("/ready", get(health::ready_handler::<S>))
        .with_state(state)
}

/// Full application: document routes and docs, plus `/health`, `/ready` and
/// `/metrics`, all measured by the HTTP metrics middleware.
pub fn app<S>(state: AppState<S>) -> io::Result<Router>
where
    S: DocumentStore + Clone + 'static,
{
    let router = create_router::<ApiDoc>(routes(&state))?;

    Ok(router
        .merge(health_router(state.config.app))
        .merge(ready_router(state))
        .route("/metrics", get(metrics_handler))
        .layer(middleware::from_fn(metrics_middleware)))
}
