//! Synchronous notification injection.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::SendNotificationResponse;
use crate::app_state::AppState;
use crate::domain::NotificationDraft;
use crate::error::{ErrorResponse, RelayError};

/// `POST /send-notification` — Push a notification to live sessions.
///
/// # Errors
///
/// Returns [`RelayError::Validation`] when the body is not JSON or lacks
/// `type` / `message`.
#[utoipa::path(
    post,
    path = "/send-notification",
    tag = "Notifications",
    summary = "Send a notification",
    description = "Pushes a notification to every live session of `recipient`, or to all live sessions when `recipient` is absent or `\"all\"`.",
    request_body = NotificationDraft,
    responses(
        (status = 200, description = "Notification pushed", body = SendNotificationResponse),
        (status = 400, description = "Missing type or message", body = ErrorResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse),
    )
)]
pub async fn send_notification(
    State(state): State<AppState>,
    payload: Result<Json<NotificationDraft>, JsonRejection>,
) -> Result<impl IntoResponse, RelayError> {
    let Json(draft) = payload.map_err(|rejection| RelayError::Validation(rejection.body_text()))?;

    let (notification, report) = state.router.submit(draft).await?;

    Ok(Json(SendNotificationResponse::delivered(notification, &report)))
}

/// Notification routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/send-notification", post(send_notification))
}
