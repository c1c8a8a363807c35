//! Liveness endpoint.

use std::sync::LazyLock;
use std::time::Instant;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::db::Database;

/// Path of the liveness endpoint. Route groups may not mount under it.
pub const HEALTH_PATH: &str = "/health";

static START_TIME: LazyLock<Instant> = LazyLock::new(Instant::now);

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime: u64,
    pub database: &'static str,
}

pub async fn health_handler(State(database): State<Database>) -> impl IntoResponse {
    let (status, code, db) = match database.ping().await {
        Ok(()) => ("up", StatusCode::OK, "up"),
        Err(e) => {
            tracing::warn!(error = %e, "Health check: database unreachable");
            ("degraded", StatusCode::SERVICE_UNAVAILABLE, "down")
        }
    };

    let body = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        uptime: START_TIME.elapsed().as_secs(),
        database: db,
    };

    (
        code,
        [(header::CACHE_CONTROL, "no-store, no-cache, must-revalidate")],
        Json(body),
    )
}
