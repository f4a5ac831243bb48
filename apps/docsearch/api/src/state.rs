//! Shared application state.

use std::sync::Arc;

use domain_documents::{DocumentService, DocumentStore, RedisDocumentStore};

/// State handed to the readiness router.
///
/// Cloning copies two pointers; the service and its Redis connection are shared.
#[derive(Clone)]
pub struct AppState<S: DocumentStore = RedisDocumentStore> {
    pub config: crate::config::Config,
    pub service: Arc<DocumentService<S>>,
}
