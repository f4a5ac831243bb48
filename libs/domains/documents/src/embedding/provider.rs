use async_trait::async_trait;

use crate::error::DocumentResult;

/// Turns text into a fixed-length vector.
///
/// Implementations must return vectors of exactly [`dimension`](Self::dimension)
/// components; the service rejects anything else before touching the store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Short label used in logs and metrics
    fn name(&self) -> &'static str;

    fn dimension(&self) -> usize;

    async fn embed(&self, text: &str) -> DocumentResult<Vec<f32>>;
}
