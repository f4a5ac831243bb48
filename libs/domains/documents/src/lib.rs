//! Documents Domain Library
//!
//! Text documents are embedded into vectors and stored as Redis hashes; free
//! text queries are embedded the same way and answered with a KNN search over
//! an HNSW vector index.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │  DocumentService │  ← upload / search / startup index check
//! └────────┬─────────┘
//!          │
//! ┌────────▼────────┐     ┌───────────────────┐
//! │  DocumentStore  │     │ EmbeddingProvider │
//! │    (trait)      │     │      (trait)      │
//! └────────┬────────┘     └─────────┬─────────┘
//!          │                        │
//! ┌────────▼───────────┐  ┌─────────▼─────────┐
//! │ RedisDocumentStore │  │  HashingProvider  │
//! └────────────────────┘  │  OpenAIProvider   │
//!                         └───────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_documents::{
//!     DocumentService, HashingProvider, IndexConfig, RedisDocumentStore,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let conn = database::redis::connect("redis://localhost:6379").await?;
//! let store = RedisDocumentStore::new(conn);
//! let embedder = Arc::new(HashingProvider::new(384)?);
//!
//! let service = DocumentService::new(store, embedder, IndexConfig::new("index_name", 384));
//! service.ensure_index(true).await?;
//!
//! service.upload("a.txt", b"hello world").await?;
//! let matches = service.search("hello world").await?;
//! assert_eq!(matches[0].document, "hello world");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod embedding;
pub mod error;
pub mod handlers;
pub mod models;
pub mod redisearch;
pub mod service;
pub mod store;

pub use config::{DocumentsConfig, EmbeddingConfig, EmbeddingProviderKind};
pub use embedding::{
    EmbeddingProvider, HashingProvider, OpenAIConfig, OpenAIProvider, provider_from_config,
};
pub use error::{DocumentError, DocumentResult};
pub use handlers::ApiDoc;
pub use models::{
    DistanceMetric, HnswConfig, IndexConfig, IndexInfo, IndexStatus, SearchMatch,
    SearchRequest, SearchResponse, UploadResponse,
};
pub use redisearch::RedisDocumentStore;
pub use service::DocumentService;
pub use store::DocumentStore;
