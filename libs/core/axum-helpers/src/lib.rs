//! # Axum Helpers
//!
//! Shared HTTP plumbing for userbase services.
//!
//! - **[`server`]**: router assembly with OpenAPI docs, `/health`, readiness
//!   probes, graceful shutdown
//! - **[`http`]**: security headers middleware
//! - **[`errors`]**: [`AppError`] and the JSON [`ErrorResponse`] body
//! - **[`extractors`]**: [`IdPath`] and [`ValidatedJson`]

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};

pub use http::security_headers;

pub use errors::{AppError, ErrorCode, ErrorResponse, error_response};

pub use extractors::{IdPath, ValidatedJson};
