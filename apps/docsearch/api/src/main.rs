use axum_helpers::server::create_production_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_documents::{
    DocumentService, EmbeddingProvider, IndexStatus, RedisDocumentStore, embedding,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    observability::init_metrics().map_err(|e| eyre::eyre!("Metrics setup failed: {}", e))?;

    let embedder = embedding::provider_from_config(&config.embedding)?;
    info!(
        provider = embedder.name(),
        dimension = embedder.dimension(),
        "Embedding provider ready"
    );

    let redis = database::redis::connect_from_config_with_retry(config.redis.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("Redis connection failed: {}", e))?;

    let index = config.documents.index_config(embedder.dimension());
    let service = DocumentService::new(RedisDocumentStore::new(redis), embedder, index)
        .with_top_k(config.documents.top_k);

    match service.ensure_index(config.documents.auto_create_index).await? {
        IndexStatus::Ready => info!(index = %service.index().name, "Using existing vector index"),
        IndexStatus::Created => info!(index = %service.index().name, "Created vector index"),
        IndexStatus::Missing => warn!(
            index = %service.index().name,
            "Vector index missing; searches return 503 until it is created"
        ),
    }

    let state = AppState {
        config,
        service: Arc::new(service),
    };
    let server = state.config.server.clone();
    let app = api::app(state.clone())?;

    info!("Starting docsearch API (30s shutdown timeout)");

    create_production_app(app, &server, Duration::from_secs(30), async move {
        // the Redis connection closes when the router drops its last clone
        drop(state);
        info!("Shutdown cleanup finished");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Docsearch API shutdown complete");
    Ok(())
}
