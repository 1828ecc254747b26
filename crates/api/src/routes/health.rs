use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `UP` when the database answers, `DEGRADED` otherwise.
    pub status: &'static str,
    pub message: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub db_healthy: bool,
}

/// GET /health -- returns service and database health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = lumina_db::health_check(&state.pool).await.is_ok();

    let (status, message) = if db_healthy {
        ("UP", "Lumina server is running")
    } else {
        ("DEGRADED", "Database is unreachable")
    };

    Json(HealthResponse {
        status,
        message,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// Mounted under `/api`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
