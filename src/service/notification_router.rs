//! Notification router: resolves a delivery set and fans the payload out.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::mpsc::error::TrySendError;

use crate::domain::{
    ConnectionRegistry, Notification, NotificationDraft, Outbox, Recipient, SessionId,
};
use crate::error::RelayError;

/// Outcome of one `deliver` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryReport {
    /// Sessions whose outbox accepted the payload.
    pub delivered_to: Vec<SessionId>,
    /// `true` if the recipient resolved to the broadcast sentinel.
    pub broadcast: bool,
    /// Resolved sessions that disconnected before their push.
    pub skipped: usize,
    /// Pushes rejected by the transport (buffer full, channel closed).
    pub failed: usize,
}

impl DeliveryReport {
    /// Number of sessions the payload was pushed to.
    #[must_use]
    pub fn delivered_count(&self) -> usize {
        self.delivered_to.len()
    }
}

/// Routes notifications to live sessions.
///
/// Stateless apart from its registry handle. Each push is a non-blocking
/// `try_send` into the target's bounded outbox, so a connection that stops
/// draining cannot hold up the rest of the fan-out.
#[derive(Debug, Clone)]
pub struct NotificationRouter {
    registry: Arc<ConnectionRegistry>,
}

impl NotificationRouter {
    /// Creates a router over the given registry.
    #[must_use]
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// Returns a reference to the inner [`ConnectionRegistry`].
    #[must_use]
    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    /// Validates a draft and delivers the resulting notification.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Validation`] if `type` or `message` is missing.
    /// Nothing is pushed in that case.
    pub async fn submit(
        &self,
        draft: NotificationDraft,
    ) -> Result<(Notification, DeliveryReport), RelayError> {
        let notification = Notification::try_from(draft)?;
        let report = self.deliver(&notification).await;
        Ok((notification, report))
    }

    /// Resolves the delivery set for `notification` and pushes to each live
    /// session in it. Individual push failures are logged and counted.
    pub async fn deliver(&self, notification: &Notification) -> DeliveryReport {
        let targets = self.resolve(&notification.recipient).await;
        let report = self.dispatch(Arc::new(notification.clone()), &targets).await;

        tracing::info!(
            notification_id = %notification.id,
            recipient = %notification.recipient,
            resolved = targets.len(),
            delivered = report.delivered_count(),
            skipped = report.skipped,
            failed = report.failed,
            "notification delivered"
        );
        report
    }

    /// Resolves a recipient to session ids. Broadcast reads the session map
    /// directly and never consults the group index.
    pub async fn resolve(&self, recipient: &Recipient) -> Vec<SessionId> {
        match recipient {
            Recipient::All => self.registry.all_session_ids().await,
            Recipient::User(user_id) => self.registry.sessions_for(user_id).await,
        }
    }

    /// Pushes `payload` to every target that is still live.
    ///
    /// The liveness check and outbox lookup happen together right before
    /// each push; sessions that have left are skipped silently.
    pub async fn dispatch(
        &self,
        payload: Arc<Notification>,
        targets: &[SessionId],
    ) -> DeliveryReport {
        let mut report = DeliveryReport {
            delivered_to: Vec::with_capacity(targets.len()),
            broadcast: payload.recipient.is_broadcast(),
            skipped: 0,
            failed: 0,
        };

        for &session_id in targets {
            let Some(outbox) = self.registry.outbox(session_id).await else {
                report.skipped += 1;
                continue;
            };
            match push(session_id, &outbox, Arc::clone(&payload)) {
                Ok(()) => report.delivered_to.push(session_id),
                Err(err) => {
                    tracing::warn!(%session_id, error = %err, "push failed");
                    report.failed += 1;
                }
            }
        }

        report
    }
}

/// Fire-and-forget push into one session's outbox.
fn push(
    session_id: SessionId,
    outbox: &Outbox,
    payload: Arc<Notification>,
) -> Result<(), RelayError> {
    outbox.try_send(payload).map_err(|err| {
        let reason = match err {
            TrySendError::Full(_) => "push buffer full",
            TrySendError::Closed(_) => "connection closed",
        };
        RelayError::TransportPush {
            session_id,
            reason: reason.to_string(),
        }
    })
}
