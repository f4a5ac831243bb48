use async_trait::async_trait;
use database::redis::{ConnectionManager, check_health};
use tracing::{debug, instrument};

use super::codec::{embedding_to_bytes, is_missing_index, parse_index_info, parse_search_reply};
use super::index::{CONTENT_FIELD, VECTOR_FIELD, create_index_args, search_args};
use crate::error::{DocumentError, DocumentResult};
use crate::models::{IndexConfig, IndexInfo, SearchMatch};
use crate::store::DocumentStore;

/// [`DocumentStore`] backed by Redis hashes and the Redis search module.
///
/// Cloning shares the underlying multiplexed connection.
#[derive(Clone)]
pub struct RedisDocumentStore {
    connection: ConnectionManager,
}

impl RedisDocumentStore {
    pub fn new(connection: ConnectionManager) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl DocumentStore for RedisDocumentStore {
    #[instrument(skip(self, content, embedding), fields(bytes = content.len(), dim = embedding.len()))]
    async fn put_document(
        &self,
        key: &str,
        content: &str,
        embedding: &[f32],
    ) -> DocumentResult<()> {
        let mut conn = self.connection.clone();
        let blob = embedding_to_bytes(embedding);

        redis::cmd("HSET")
            .arg(key)
            .arg(CONTENT_FIELD)
            .arg(content)
            .arg(VECTOR_FIELD)
            .arg(blob.as_slice())
            .query_async::<()>(&mut conn)
            .await?;

        debug!("Stored document");
        Ok(())
    }

    #[instrument(skip(self, embedding))]
    async fn knn_search(
        &self,
        index: &str,
        embedding: &[f32],
        k: usize,
    ) -> DocumentResult<Vec<SearchMatch>> {
        let mut conn = self.connection.clone();

        let mut cmd = redis::cmd("FT.SEARCH");
        for arg in search_args(index, embedding, k) {
            cmd.arg(arg.as_slice());
        }

        let reply: redis::Value = cmd.query_async(&mut conn).await.map_err(|e| {
            if is_missing_index(&e) {
                DocumentError::IndexNotFound(index.to_string())
            } else {
                DocumentError::from(e)
            }
        })?;

        let matches = parse_search_reply(&reply)?;
        debug!(matches = matches.len(), "KNN search completed");
        Ok(matches)
    }

    #[instrument(skip(self), fields(index = %config.name, dim = config.dimension))]
    async fn create_index(&self, config: &IndexConfig) -> DocumentResult<()> {
        let mut conn = self.connection.clone();

        redis::cmd("FT.CREATE")
            .arg(create_index_args(config))
            .query_async::<()>(&mut conn)
            .await?;

        tracing::info!(distance = %config.distance, "Created vector index");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn index_info(&self, name: &str) -> DocumentResult<Option<IndexInfo>> {
        let mut conn = self.connection.clone();

        match redis::cmd("FT.INFO")
            .arg(name)
            .query_async::<redis::Value>(&mut conn)
            .await
        {
            Ok(reply) => Ok(Some(parse_index_info(name, VECTOR_FIELD, &reply))),
            Err(e) if is_missing_index(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn ping(&self) -> DocumentResult<()> {
        let mut conn = self.connection.clone();
        check_health(&mut conn).await?;
        Ok(())
    }
}
