//! Health check endpoints for the Nikola API.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::db::health_check as db_health_check;
use crate::state::AppState;

/// Liveness response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthzResponse {
    /// Always `true` while the process serves requests
    pub ok: bool,

    /// Application name from the schema (`null` when unnamed)
    pub app: Option<String>,
}

/// Readiness response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// Overall status ("ok" or "unhealthy")
    pub status: String,

    /// Database connectivity status
    pub database: String,

    /// Number of resources served
    pub resources: usize,

    /// Server uptime in seconds
    pub uptime_seconds: u64,

    /// Server version
    pub version: String,
}

/// Liveness endpoint.
///
/// `GET /healthz`
///
/// ```json
/// { "ok": true, "app": "Todo App" }
/// ```
pub async fn healthz(State(state): State<AppState>) -> Json<HealthzResponse> {
    Json(HealthzResponse {
        ok: true,
        app: state.app_name().map(str::to_string),
    })
}

/// Readiness endpoint.
///
/// `GET /readyz`
///
/// - `200 OK` when the database answers
/// - `503 Service Unavailable` otherwise
pub async fn readyz(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let db_healthy = db_health_check(&state.db).await;

    let (status_code, status, database) = if db_healthy {
        (StatusCode::OK, "ok", "connected")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy", "disconnected")
    };

    let response = ReadinessResponse {
        status: status.to_string(),
        database: database.to_string(),
        resources: state.schema.resources.len(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (status_code, Json(response))
}
