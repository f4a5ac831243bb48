//! Create the RediSearch vector index used by the docsearch API.
//!
//! Run with: cargo run -p docsearch_api --bin create-index -- --dimension 384

use clap::Parser;
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv};
use database::redis::RedisConfig;
use domain_documents::config::{DEFAULT_EMBEDDING_DIMENSION, DEFAULT_INDEX_NAME};
use domain_documents::{DistanceMetric, DocumentStore, HnswConfig, IndexConfig, RedisDocumentStore};
use eyre::Result;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "create-index")]
#[command(about = "Create the HNSW vector index over document hashes")]
struct Cli {
    /// Index name
    #[arg(short, long, default_value = DEFAULT_INDEX_NAME)]
    name: String,

    /// Embedding dimension; must match the provider the API runs with
    #[arg(short, long, default_value_t = DEFAULT_EMBEDDING_DIMENSION)]
    dimension: usize,

    /// COSINE, L2 or IP
    #[arg(long, default_value_t = DistanceMetric::Cosine)]
    distance: DistanceMetric,

    /// Only index hashes whose key starts with this prefix
    #[arg(short, long, default_value = "")]
    prefix: String,

    /// HNSW max outgoing edges per node
    #[arg(long)]
    m: Option<u32>,

    /// HNSW candidate list size while building
    #[arg(long)]
    ef_construction: Option<u32>,

    /// Overrides REDIS_URL / REDIS_HOST
    #[arg(long)]
    redis_url: Option<String>,

    /// Succeed without changes when the index already exists
    #[arg(long)]
    if_not_exists: bool,
}

impl Cli {
    fn index_config(&self) -> IndexConfig {
        IndexConfig::new(&self.name, self.dimension)
            .with_distance(self.distance)
            .with_key_prefix(&self.prefix)
            .with_hnsw(HnswConfig {
                m: self.m,
                ef_construction: self.ef_construction,
            })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();
    init_tracing(&Environment::from_env());

    let cli = Cli::parse();
    if cli.dimension == 0 {
        eyre::bail!("--dimension must be greater than zero");
    }

    let redis_config = match &cli.redis_url {
        Some(url) => RedisConfig::new(url),
        None => RedisConfig::from_env()?,
    };
    let redis = database::redis::connect_from_config_with_retry(redis_config, None)
        .await
        .map_err(|e| eyre::eyre!("Redis connection failed: {}", e))?;
    let store = RedisDocumentStore::new(redis);

    if let Some(existing) = store.index_info(&cli.name).await? {
        if cli.if_not_exists {
            info!(
                index = %existing.name,
                dimension = ?existing.dimension,
                docs = ?existing.num_docs,
                "Index already exists, nothing to do"
            );
            return Ok(());
        }
        eyre::bail!("index '{}' already exists", cli.name);
    }

    let config = cli.index_config();
    store.create_index(&config).await?;
    info!(
        index = %config.name,
        dimension = config.dimension,
        distance = %config.distance,
        "Index created"
    );

    Ok(())
}
