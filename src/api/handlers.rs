use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;
use std::time::Instant;

use crate::errors::{CaughtError, ExceptionsHandler};

lazy_static::lazy_static! {
    static ref START_TIME: Instant = Instant::now();
}

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub exceptions: ExceptionsHandler,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = serde_json::Value)
    )
)]
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "apiato-core",
        "version": env!("CARGO_PKG_VERSION"),
        "build": {
            "version": env!("CARGO_PKG_VERSION"),
            "profile": if cfg!(debug_assertions) { "debug" } else { "release" },
        },
        "uptime_seconds": START_TIME.elapsed().as_secs(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "health",
    responses(
        (status = 200, description = "Process is alive", body = serde_json::Value)
    )
)]
pub async fn health_live() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "alive",
        "service": "apiato-core",
    }))
}

/// Target of the unauthenticated redirect for non-JSON clients
pub async fn login() -> impl IntoResponse {
    (StatusCode::OK, "Login required")
}

/// Fallback for unmatched paths
pub async fn not_found() -> Result<(), CaughtError> {
    Err(CaughtError::http(StatusCode::NOT_FOUND.as_u16(), ""))
}
