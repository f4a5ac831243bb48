use async_trait::async_trait;

use crate::error::DocumentResult;
use crate::models::{IndexConfig, IndexInfo, SearchMatch};

/// Persistence and nearest-neighbour search for embedded documents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Write `content` and `embedding` under `key`, replacing any previous record.
    async fn put_document(&self, key: &str, content: &str, embedding: &[f32])
    -> DocumentResult<()>;

    /// Up to `k` documents closest to `embedding`, closest first.
    ///
    /// Fails with `IndexNotFound` when `index` does not exist.
    async fn knn_search(
        &self,
        index: &str,
        embedding: &[f32],
        k: usize,
    ) -> DocumentResult<Vec<SearchMatch>>;

    async fn create_index(&self, config: &IndexConfig) -> DocumentResult<()>;

    /// `None` when the index does not exist.
    async fn index_info(&self, name: &str) -> DocumentResult<Option<IndexInfo>>;

    async fn ping(&self) -> DocumentResult<()>;
}
