//! Redis hashes plus the Redis search module as the document store.

pub mod codec;
pub mod index;
mod store;

pub use index::{CONTENT_FIELD, SCORE_ALIAS, VECTOR_FIELD, create_index_args, knn_query};
pub use store::RedisDocumentStore;
