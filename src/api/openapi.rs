//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use crate::api::dto::{HealthResponse, SendNotificationResponse, StatusResponse};
use crate::api::handlers::{notification, system};
use crate::domain::{Notification, NotificationDraft, SessionSummary};
use crate::error::ErrorResponse;

/// Generated OpenAPI description, served by Swagger UI when the
/// `swagger-ui` feature is enabled.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "notify-relay", description = "Real-time notification relay"),
    paths(
        notification::send_notification,
        system::status_handler,
        system::health_handler,
    ),
    components(schemas(
        NotificationDraft,
        Notification,
        SendNotificationResponse,
        StatusResponse,
        SessionSummary,
        HealthResponse,
        ErrorResponse,
    )),
    tags(
        (name = "Notifications", description = "Notification injection"),
        (name = "System", description = "Status and health"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        for path in ["/send-notification", "/status", "/health"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn documents_session_summary_schema() {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.map(|c| c.schemas).unwrap_or_default();
        assert!(schemas.contains_key("SessionSummary"));
    }
}
