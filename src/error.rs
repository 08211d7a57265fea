//! Relay error types with HTTP status code mapping.
//!
//! [`RelayError`] is the central error type. Each variant maps to an HTTP
//! status and a flat JSON body:
//!
//! ```json
//! { "error": "Bad Request", "message": "type and message are required" }
//! ```
//!
//! Server-side variants never leak their inner detail into the body; the
//! detail is logged instead.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::SessionId;

/// Generic message returned for failures whose detail stays server-side.
pub const INTERNAL_MESSAGE: &str = "internal server error";

/// Structured JSON error response body.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Short error category, usually the HTTP reason phrase.
    pub error: String,
    /// Human-readable message safe to show to the caller.
    pub message: String,
}

impl ErrorResponse {
    /// Builds a body for `status` with the given message.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: message.into(),
        }
    }
}

/// Relay error taxonomy.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Malformed notification input (missing `type` / `message`, bad JSON).
    #[error("{0}")]
    Validation(String),

    /// Session id collision at connect time.
    #[error("session {0} is already registered")]
    DuplicateSession(SessionId),

    /// A single connection could not accept a push.
    #[error("push to session {session_id} failed: {reason}")]
    TransportPush {
        /// Session whose outbox rejected the push.
        session_id: SessionId,
        /// Why the push failed (buffer full, connection closed).
        reason: String,
    },

    /// No route matches the request.
    #[error("route {0} not found")]
    UnknownRoute(String),
}

impl RelayError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::DuplicateSession(_) => StatusCode::CONFLICT,
            Self::TransportPush { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::UnknownRoute(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Returns the message that may be shown to a caller.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::TransportPush { .. } => INTERNAL_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    /// Builds the JSON body for this error.
    #[must_use]
    pub fn to_body(&self) -> ErrorResponse {
        ErrorResponse::new(self.status_code(), self.public_message())
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let mut response = axum::Json(self.to_body()).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = RelayError::Validation("type and message are required".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let body = err.to_body();
        assert_eq!(body.error, "Bad Request");
        assert_eq!(body.message, "type and message are required");
    }

    #[test]
    fn unknown_route_maps_to_not_found() {
        let err = RelayError::UnknownRoute("GET /nope".to_string());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_body().message, "route GET /nope not found");
    }

    #[test]
    fn transport_push_detail_is_hidden() {
        let err = RelayError::TransportPush {
            session_id: SessionId::new(),
            reason: "buffer full".to_string(),
        };
        assert_eq!(err.public_message(), INTERNAL_MESSAGE);
        assert!(err.to_string().contains("buffer full"));
    }

    #[test]
    fn duplicate_session_is_conflict() {
        let err = RelayError::DuplicateSession(SessionId::new());
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }
}
