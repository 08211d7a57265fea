//! Status and health DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{SessionId, SessionSummary};

/// Response body for `GET /status`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    /// Always `"ok"` while the process is serving.
    pub status: String,
    /// Number of live sessions.
    pub socket_connections: usize,
    /// Ids of every live session.
    #[schema(value_type = Vec<String>)]
    pub connected_sockets: Vec<SessionId>,
    /// Per-session detail, in the same order as `connected_sockets`.
    pub sessions: Vec<SessionSummary>,
    /// Seconds since startup.
    pub uptime: f64,
    /// Time the status was taken.
    pub timestamp: DateTime<Utc>,
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"healthy"`.
    pub status: String,
    /// Current time, RFC 3339.
    pub timestamp: String,
    /// Crate version.
    pub version: String,
}
