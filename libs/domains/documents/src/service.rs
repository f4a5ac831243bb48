use std::sync::Arc;
use std::time::Instant;

use observability::DocumentMetrics;
use tracing::{info, instrument, warn};

use crate::config::DEFAULT_TOP_K;
use crate::embedding::EmbeddingProvider;
use crate::error::{DocumentError, DocumentResult};
use crate::models::{IndexConfig, IndexStatus, SearchMatch};
use crate::store::DocumentStore;

const DIMENSION_CHECK_TEXT: &str = "dimension check";

/// Upload and search on top of an embedding provider and a document store.
pub struct DocumentService<S: DocumentStore> {
    store: S,
    embedder: Arc<dyn EmbeddingProvider>,
    index: IndexConfig,
    top_k: usize,
}

impl<S: DocumentStore> DocumentService<S> {
    pub fn new(store: S, embedder: Arc<dyn EmbeddingProvider>, index: IndexConfig) -> Self {
        Self {
            store,
            embedder,
            index,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    pub fn index(&self) -> &IndexConfig {
        &self.index
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Embed `text` and check the result fits the index.
    async fn embed(&self, text: &str) -> DocumentResult<Vec<f32>> {
        let started = Instant::now();
        let embedding = self.embedder.embed(text).await?;
        DocumentMetrics::record_embedding(self.embedder.name(), started.elapsed().as_secs_f64());

        if embedding.len() != self.index.dimension {
            return Err(DocumentError::DimensionMismatch {
                expected: self.index.dimension,
                actual: embedding.len(),
            });
        }
        Ok(embedding)
    }

    /// Decode, trim, embed and store an uploaded file under its filename.
    ///
    /// Re-uploading a filename replaces the earlier document.
    #[instrument(skip(self, bytes), fields(bytes = bytes.len()))]
    pub async fn upload(&self, filename: &str, bytes: &[u8]) -> DocumentResult<()> {
        let result = self.store_upload(filename, bytes).await;
        DocumentMetrics::record_upload(result.is_ok());
        result
    }

    async fn store_upload(&self, filename: &str, bytes: &[u8]) -> DocumentResult<()> {
        if filename.trim().is_empty() {
            return Err(DocumentError::Validation(
                "uploaded file must have a filename".to_string(),
            ));
        }

        let content = std::str::from_utf8(bytes)?.trim();
        let embedding = self.embed(content).await?;

        self.store
            .put_document(&self.index.document_key(filename), content, &embedding)
            .await?;

        info!(filename, chars = content.len(), "Document uploaded");
        Ok(())
    }

    /// Up to `top_k` stored documents nearest to `query`, closest first.
    #[instrument(skip(self, query), fields(query_len = query.len(), k = self.top_k))]
    pub async fn search(&self, query: &str) -> DocumentResult<Vec<SearchMatch>> {
        let result = self.run_search(query).await;
        DocumentMetrics::record_search(result.as_ref().ok().map(Vec::len));
        result
    }

    async fn run_search(&self, query: &str) -> DocumentResult<Vec<SearchMatch>> {
        let embedding = self.embed(query).await?;
        let mut matches = self
            .store
            .knn_search(&self.index.name, &embedding, self.top_k)
            .await?;
        matches.truncate(self.top_k);
        Ok(matches)
    }

    /// Startup check of the vector index.
    ///
    /// - embedder output length differs from the index: `DimensionMismatch`
    /// - exists with a different dimension: `DimensionMismatch`
    /// - missing and `auto_create`: created
    /// - missing otherwise: reported as `Missing`, searches will fail until it exists
    #[instrument(skip(self), fields(index = %self.index.name))]
    pub async fn ensure_index(&self, auto_create: bool) -> DocumentResult<IndexStatus> {
        if self.embedder.dimension() != self.index.dimension {
            return Err(DocumentError::DimensionMismatch {
                expected: self.index.dimension,
                actual: self.embedder.dimension(),
            });
        }

        // providers can return a different length than they report
        self.embed(DIMENSION_CHECK_TEXT).await?;

        match self.store.index_info(&self.index.name).await? {
            Some(info) => match info.dimension {
                Some(dim) if dim != self.index.dimension => Err(DocumentError::DimensionMismatch {
                    expected: self.index.dimension,
                    actual: dim,
                }),
                Some(_) => {
                    info!(docs = ?info.num_docs, "Vector index ready");
                    Ok(IndexStatus::Ready)
                }
                None => {
                    warn!("Vector index does not report its dimension; assuming it matches");
                    Ok(IndexStatus::Ready)
                }
            },
            None if auto_create => {
                self.store.create_index(&self.index).await?;
                Ok(IndexStatus::Created)
            }
            None => {
                warn!("Vector index is missing and auto-create is disabled");
                Ok(IndexStatus::Missing)
            }
        }
    }

    /// Store reachability, for readiness probes.
    pub async fn check_store(&self) -> DocumentResult<()> {
        self.store.ping().await
    }

    /// Index presence, for readiness probes.
    pub async fn check_index(&self) -> DocumentResult<()> {
        match self.store.index_info(&self.index.name).await? {
            Some(_) => Ok(()),
            None => Err(DocumentError::IndexNotFound(self.index.name.clone())),
        }
    }
}
