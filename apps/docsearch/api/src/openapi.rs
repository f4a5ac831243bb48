use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    components(schemas(
        axum_helpers::ErrorResponse,
        axum_helpers::server::HealthResponse,
        axum_helpers::server::ReadyResponse,
        axum_helpers::server::CheckStatus
    )),
    info(
        title = "Docsearch API",
        version = "0.1.0",
        description = "Upload plain-text documents and find the closest ones to a query by vector similarity"
    ),
    modifiers(&DocumentRoutes)
)]
pub struct ApiDoc;

/// Document routes live at the root, so they are merged rather than nested.
struct DocumentRoutes;

impl Modify for DocumentRoutes {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.merge(domain_documents::ApiDoc::openapi());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_document_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/upload/"));
        assert!(doc.paths.paths.contains_key("/search/"));
        assert_eq!(doc.info.title, "Docsearch API");
    }
}
