//! # Axum Helpers
//!
//! Shared HTTP plumbing for the service binaries.
//!
//! - **[`errors`]**: `AppError` and the JSON error body with stable codes
//! - **[`http`]**: CORS and security-header middleware
//! - **[`server`]**: router assembly with OpenAPI docs, health probes,
//!   graceful shutdown

pub mod errors;
pub mod http;
pub mod server;

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use http::{cors_layer_from_env, security_headers};

pub use server::{
    CheckStatus, HealthCheckFuture, HealthResponse, ReadyResponse, ShutdownCoordinator,
    create_production_app, create_router, health_router, run_health_checks,
};
