use axum::{
    Json, Router,
    body::Bytes,
    extract::{
        DefaultBodyLimit, Multipart, Query, State, multipart::MultipartRejection,
        rejection::QueryRejection,
    },
    routing::post,
};
use axum_helpers::{
    AppError, ErrorResponse,
    errors::responses::{
        BadRequestResponse, InternalServerErrorResponse, PayloadTooLargeResponse,
        ServiceUnavailableResponse,
    },
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::models::{SearchMatch, SearchRequest, SearchResponse, UploadResponse};
use crate::service::DocumentService;
use crate::store::DocumentStore;

/// Multipart field carrying the document
pub const FILE_FIELD: &str = "file";

/// OpenAPI documentation for the Documents API
#[derive(OpenApi)]
#[openapi(
    paths(upload_document, search_documents),
    components(
        schemas(UploadForm, UploadResponse, SearchRequest, SearchResponse, SearchMatch, ErrorResponse),
        responses(
            BadRequestResponse,
            PayloadTooLargeResponse,
            ServiceUnavailableResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Documents", description = "Document upload and similarity search")
    )
)]
pub struct ApiDoc;

/// Upload and search routes, with and without the trailing slash.
///
/// Request bodies above `upload_max_bytes` are rejected with 413.
pub fn router<S: DocumentStore + 'static>(
    service: Arc<DocumentService<S>>,
    upload_max_bytes: usize,
) -> Router {
    Router::new()
        .route("/upload/", post(upload_document::<S>))
        .route("/upload", post(upload_document::<S>))
        .route("/search/", post(search_documents::<S>))
        .route("/search", post(search_documents::<S>))
        .layer(DefaultBodyLimit::max(upload_max_bytes))
        .with_state(service)
}

/// Multipart form accepted by the upload endpoint
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    /// UTF-8 text file; its filename becomes the document key
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Free-text query; when absent the JSON body's `query` is used
    pub query: Option<String>,
}

/// Upload a text document
///
/// The content is decoded as UTF-8, trimmed, embedded and stored under the
/// uploaded filename. Uploading the same filename again replaces the document.
#[utoipa::path(
    post,
    path = "/upload/",
    tag = "Documents",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Document stored", body = UploadResponse),
        (status = 400, response = BadRequestResponse),
        (status = 413, response = PayloadTooLargeResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn upload_document<S: DocumentStore>(
    State(service): State<Arc<DocumentService<S>>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_owned)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| AppError::BadRequest("uploaded file must have a filename".into()))?;
        let bytes = field.bytes().await?;

        service.upload(&filename, &bytes).await?;
        return Ok(Json(UploadResponse::success()));
    }

    Err(AppError::BadRequest(format!(
        "multipart field '{}' is required",
        FILE_FIELD
    )))
}

/// Search documents by similarity
///
/// Returns up to K documents ordered by ascending vector distance, so the
/// first match is the closest.
#[utoipa::path(
    post,
    path = "/search/",
    tag = "Documents",
    params(SearchParams),
    request_body(
        content = SearchRequest,
        description = "Used only when the `query` parameter is absent",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Nearest documents, closest first", body = SearchResponse),
        (status = 400, response = BadRequestResponse),
        (status = 503, response = ServiceUnavailableResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_documents<S: DocumentStore>(
    State(service): State<Arc<DocumentService<S>>>,
    params: Result<Query<SearchParams>, QueryRejection>,
    body: Bytes,
) -> Result<Json<SearchResponse>, AppError> {
    let Query(params) = params?;

    let query = match params.query {
        Some(query) => query,
        None if body.is_empty() => {
            return Err(AppError::BadRequest("query is required".into()));
        }
        None => {
            serde_json::from_slice::<SearchRequest>(&body)
                .map_err(|e| AppError::BadRequest(format!("invalid search body: {}", e)))?
                .query
        }
    };

    let matches = service.search(&query).await?;
    Ok(Json(SearchResponse { matches }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::HashingProvider;
    use crate::error::DocumentError;
    use crate::models::IndexConfig;
    use crate::store::MockDocumentStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    const BOUNDARY: &str = "docsearch-boundary";
    const DIM: usize = 16;

    fn app(store: MockDocumentStore, limit: usize) -> Router {
        let embedder = Arc::new(HashingProvider::new(DIM).unwrap());
        let service = DocumentService::new(store, embedder, IndexConfig::new("index_name", DIM));
        router(Arc::new(service), limit)
    }

    fn multipart_body(field: &str, filename: Option<&str>, content: &[u8]) -> Vec<u8> {
        let disposition = match filename {
            Some(name) => format!("form-data; name=\"{}\"; filename=\"{}\"", field, name),
            None => format!("form-data; name=\"{}\"", field),
        };
        let mut body = format!(
            "--{}\r\nContent-Disposition: {}\r\nContent-Type: text/plain\r\n\r\n",
            BOUNDARY, disposition
        )
        .into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    fn upload_request(uri: &str, body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn storing_store() -> MockDocumentStore {
        let mut store = MockDocumentStore::new();
        store
            .expect_put_document()
            .withf(|key, content, _| key == "a.txt" && content == "hello world")
            .times(1)
            .returning(|_, _, _| Ok(()));
        store
    }

    #[tokio::test]
    async fn test_upload_returns_success_message() {
        let response = app(storing_store(), 1024)
            .oneshot(upload_request(
                "/upload/",
                multipart_body("file", Some("a.txt"), b"hello world\n"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = json_body(response.into_body()).await;
        assert_eq!(body, serde_json::json!({"message": "Document uploaded successfully"}));
    }

    #[tokio::test]
    async fn test_upload_without_trailing_slash() {
        let response = app(storing_store(), 1024)
            .oneshot(upload_request(
                "/upload",
                multipart_body("file", Some("a.txt"), b"hello world"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_upload_invalid_utf8_is_bad_request() {
        let mut store = MockDocumentStore::new();
        store.expect_put_document().never();

        let response = app(store, 1024)
            .oneshot(upload_request(
                "/upload/",
                multipart_body("file", Some("bin.dat"), &[0xff, 0xfe, 0xfd]),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = json_body(response.into_body()).await;
        assert_eq!(body.error, "BAD_REQUEST");
        assert!(body.message.contains("UTF-8"));
    }

    #[tokio::test]
    async fn test_upload_missing_file_field_is_bad_request() {
        let mut store = MockDocumentStore::new();
        store.expect_put_document().never();

        let response = app(store, 1024)
            .oneshot(upload_request(
                "/upload/",
                multipart_body("document", Some("a.txt"), b"hello"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_without_filename_is_bad_request() {
        let mut store = MockDocumentStore::new();
        store.expect_put_document().never();

        let response = app(store, 1024)
            .oneshot(upload_request("/upload/", multipart_body("file", None, b"hello")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_not_multipart_is_bad_request() {
        let response = app(MockDocumentStore::new(), 1024)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/upload/")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_over_limit_is_payload_too_large() {
        let mut store = MockDocumentStore::new();
        store.expect_put_document().never();

        let response = app(store, 64)
            .oneshot(upload_request(
                "/upload/",
                multipart_body("file", Some("big.txt"), &[b'a'; 4096]),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_search_with_query_parameter() {
        let mut store = MockDocumentStore::new();
        store
            .expect_knn_search()
            .withf(|index, _, k| index == "index_name" && *k == 3)
            .times(1)
            .returning(|_, _, _| {
                Ok(vec![SearchMatch {
                    document: "hello world".into(),
                    score: 0.0,
                }])
            });

        let response = app(store, 1024)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/search/?query=hello%20world")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: SearchResponse = json_body(response.into_body()).await;
        assert_eq!(body.matches.len(), 1);
        assert_eq!(body.matches[0].document, "hello world");
        assert_eq!(body.matches[0].score, 0.0);
    }

    #[tokio::test]
    async fn test_search_with_json_body() {
        let mut store = MockDocumentStore::new();
        store
            .expect_knn_search()
            .times(1)
            .returning(|_, _, _| Ok(vec![]));

        let response = app(store, 1024)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/search")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"query": "hello"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = json_body(response.into_body()).await;
        assert_eq!(body, serde_json::json!({"matches": []}));
    }

    #[tokio::test]
    async fn test_search_without_query_is_bad_request() {
        let mut store = MockDocumentStore::new();
        store.expect_knn_search().never();

        let response = app(store, 1024)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/search/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_search_missing_index_is_service_unavailable() {
        let mut store = MockDocumentStore::new();
        store
            .expect_knn_search()
            .returning(|index, _, _| Err(DocumentError::IndexNotFound(index.to_string())));

        let response = app(store, 1024)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/search/?query=hello")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: ErrorResponse = json_body(response.into_body()).await;
        assert_eq!(body.error, "SERVICE_UNAVAILABLE");
        assert!(body.message.contains("index_name"));
    }

    #[test]
    fn test_openapi_lists_both_endpoints() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/upload/"));
        assert!(doc.paths.paths.contains_key("/search/"));
    }
}
