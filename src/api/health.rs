//! Liveness and database health.

use super::AppState;
use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthBody {
    /// `ok` or `degraded`
    pub status: &'static str,
    /// Crate name
    pub service: &'static str,
    /// Crate version
    pub version: &'static str,
    /// `connected` or `unavailable`
    pub database: &'static str,
}

/// 200 when the database answers a ping, 503 otherwise.
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthBody>) {
    let (code, status, database) = match state.db.ping().await {
        Ok(()) => (StatusCode::OK, "ok", "connected"),
        Err(e) => {
            warn!("Health check database ping failed: {e}");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unavailable")
        }
    };

    (
        code,
        Json(HealthBody {
            status,
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            database,
        }),
    )
}
