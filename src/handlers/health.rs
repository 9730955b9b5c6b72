use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Serialize;
use std::time::Instant;

/// Component health status
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Up,
    Down,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    pub status: ComponentStatus,
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub database: ComponentHealth,
    pub timestamp: String,
}

/// Basic liveness probe
async fn liveness_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "up",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Readiness probe; pings the database
async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();
    let db_result = crate::db::check_connection(&state.db).await;
    let latency_ms = start.elapsed().as_millis() as u64;

    let (status_code, status, database) = match db_result {
        Ok(()) => (
            StatusCode::OK,
            "ready",
            ComponentHealth {
                status: ComponentStatus::Up,
                latency_ms,
                error: None,
            },
        ),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            "not_ready",
            ComponentHealth {
                status: ComponentStatus::Down,
                latency_ms,
                error: Some("database unreachable".to_string()),
            },
        ),
    };

    (
        status_code,
        Json(ReadinessResponse {
            status,
            database,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }),
    )
}

/// Endpoints:
/// - GET /health         - liveness, always 200 while the process serves requests
/// - GET /health/ready   - readiness, checks database connectivity
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(liveness_check))
        .route("/ready", get(readiness_check))
}
