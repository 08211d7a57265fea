//! System endpoints: status, health check, not-found fallback.

use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{HealthResponse, StatusResponse};
use crate::app_state::AppState;
use crate::error::RelayError;

/// `GET /status` — Live connection snapshot.
#[utoipa::path(
    get,
    path = "/status",
    tag = "System",
    summary = "Relay status",
    description = "Returns the number, ids and details of live sessions, process uptime, and the current timestamp.",
    responses(
        (status = 200, description = "Relay is serving", body = StatusResponse),
    )
)]
pub async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let sessions = state.registry.summaries().await;
    let connected_sockets: Vec<_> = sessions.iter().map(|s| s.session_id).collect();
    (
        StatusCode::OK,
        Json(StatusResponse {
            status: "ok".to_string(),
            socket_connections: connected_sockets.len(),
            connected_sockets,
            sessions,
            uptime: state.uptime_secs(),
            timestamp: Utc::now(),
        }),
    )
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Fallback for any unmatched route.
pub async fn not_found_handler(method: Method, uri: Uri) -> RelayError {
    RelayError::UnknownRoute(format!("{method} {}", uri.path()))
}

/// System routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
}
