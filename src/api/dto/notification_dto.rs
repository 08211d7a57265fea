//! Notification submission DTOs.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Notification;
use crate::service::DeliveryReport;

/// Response body for `POST /send-notification`.
///
/// The WebSocket `notification-sent` acknowledgement uses the same shape.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationResponse {
    /// Always `true`; failures are reported as error bodies instead.
    pub success: bool,
    /// The notification exactly as it was pushed.
    pub notification: Notification,
    /// Number of sessions the notification was pushed to.
    pub delivered_count: usize,
}

impl SendNotificationResponse {
    /// Builds the success body from a delivered notification.
    #[must_use]
    pub fn delivered(notification: Notification, report: &DeliveryReport) -> Self {
        Self {
            success: true,
            notification,
            delivered_count: report.delivered_count(),
        }
    }
}
