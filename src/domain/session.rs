//! Session record: one live connection and its identity metadata.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;
use utoipa::ToSchema;

use super::{Notification, SessionId};

/// Push handle feeding a connection's writer task.
///
/// Bounded, so a connection that stops draining fills its buffer and
/// further pushes fail fast instead of queueing without limit.
pub type Outbox = mpsc::Sender<Arc<Notification>>;

/// One live connection as tracked by the [`super::ConnectionRegistry`].
///
/// The registry owns every `Session`. Other components only see the
/// [`Outbox`] clone they need for a single delivery call.
#[derive(Debug)]
pub struct Session {
    /// Unique session identifier (immutable).
    pub session_id: SessionId,

    /// User identifier supplied by the client at connect time, if any.
    pub user_id: Option<String>,

    /// When the connection was registered.
    pub connected_at: DateTime<Utc>,

    /// Sender side of the connection's push buffer.
    pub outbox: Outbox,
}

impl Session {
    /// Creates a session record stamped with the current time.
    ///
    /// An empty `user_id` is treated as anonymous.
    #[must_use]
    pub fn new(session_id: SessionId, user_id: Option<String>, outbox: Outbox) -> Self {
        Self {
            session_id,
            user_id: user_id.filter(|u| !u.is_empty()),
            connected_at: Utc::now(),
            outbox,
        }
    }
}

/// Read-only view of a session, reported by `GET /status`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    /// Session identifier.
    #[schema(value_type = String)]
    pub session_id: SessionId,
    /// Associated user, if any.
    pub user_id: Option<String>,
    /// Connect timestamp.
    pub connected_at: DateTime<Utc>,
}

impl From<&Session> for SessionSummary {
    fn from(session: &Session) -> Self {
        Self {
            session_id: session.session_id,
            user_id: session.user_id.clone(),
            connected_at: session.connected_at,
        }
    }
}
