use axum::{routing::get, Json, Router};
use chrono::Utc;
use lumina_core::types::Timestamp;
use serde::Serialize;

use crate::state::AppState;

/// Entry points advertised to clients discovering the server.
#[derive(Serialize)]
pub struct Endpoints {
    pub health: &'static str,
    pub auth: &'static str,
    pub notes: &'static str,
    pub posts: &'static str,
    pub users: &'static str,
}

#[derive(Serialize)]
pub struct ServerInfo {
    pub name: &'static str,
    pub status: &'static str,
    pub version: &'static str,
    pub message: &'static str,
    pub timestamp: Timestamp,
    pub endpoints: Endpoints,
}

/// GET /server/info
async fn server_info() -> Json<ServerInfo> {
    Json(ServerInfo {
        name: "Lumina Server",
        status: "running",
        version: env!("CARGO_PKG_VERSION"),
        message: "Lumina learning assistant API",
        timestamp: Utc::now(),
        endpoints: Endpoints {
            health: "/api/health",
            auth: "/api/auth",
            notes: "/api/notes",
            posts: "/api/posts",
            users: "/api/users",
        },
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/server/info", get(server_info))
}
