//! Notification value objects.
//!
//! A [`NotificationDraft`] is whatever a caller submitted; validating it
//! yields a [`Notification`], which is what gets pushed to connections on
//! the `notification` channel. Notifications live only for the duration of
//! one delivery call.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::RelayError;

/// Sentinel recipient meaning "every live session".
pub const BROADCAST: &str = "all";

/// Delivery target of a notification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum Recipient {
    /// Every live session, regardless of group.
    All,
    /// Every live session registered under this user id.
    User(String),
}

impl Recipient {
    /// Normalizes a raw recipient: absent, empty, or `"all"` becomes
    /// [`Recipient::All`]. Any other value is kept verbatim, matching how
    /// user ids are stored at connect time.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("" | BROADCAST) => Self::All,
            Some(user) => Self::User(user.to_string()),
        }
    }

    /// Returns `true` for the broadcast sentinel.
    #[must_use]
    pub const fn is_broadcast(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Returns the wire form (`"all"` or the user id).
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => BROADCAST,
            Self::User(user) => user,
        }
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Recipient> for String {
    fn from(recipient: Recipient) -> Self {
        match recipient {
            Recipient::All => BROADCAST.to_string(),
            Recipient::User(user) => user,
        }
    }
}

/// Unvalidated notification input as received from either ingress.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct NotificationDraft {
    /// Caller-supplied identifier; generated when absent.
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    /// Free-form notification type (required).
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Free-form message body (required).
    #[serde(default)]
    pub message: Option<String>,
    /// Target user id, or `"all"` / absent for broadcast.
    #[serde(default)]
    pub recipient: Option<String>,
}

impl NotificationDraft {
    /// Convenience constructor used by tests and internal callers.
    #[must_use]
    pub fn new(kind: &str, message: &str, recipient: Option<&str>) -> Self {
        Self {
            id: None,
            kind: Some(kind.to_string()),
            message: Some(message.to_string()),
            recipient: recipient.map(str::to_string),
        }
    }
}

/// A validated notification, exactly as pushed to clients.
///
/// Wire shape: `{_id, type, message, recipient, read, createdAt}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Notification {
    /// Unique notification id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Free-form notification type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Free-form message body.
    pub message: String,
    /// `"all"` for broadcast, otherwise the target user id.
    #[schema(value_type = String)]
    pub recipient: Recipient,
    /// Always `false` at creation.
    pub read: bool,
    /// Creation timestamp.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl TryFrom<NotificationDraft> for Notification {
    type Error = RelayError;

    fn try_from(draft: NotificationDraft) -> Result<Self, Self::Error> {
        let kind = draft.kind.filter(|k| !k.is_empty());
        let message = draft.message.filter(|m| !m.is_empty());
        let (Some(kind), Some(message)) = (kind, message) else {
            return Err(RelayError::Validation(
                "type and message are required".to_string(),
            ));
        };

        Ok(Self {
            id: draft
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            kind,
            message,
            recipient: Recipient::parse(draft.recipient.as_deref()),
            read: false,
            created_at: Utc::now(),
        })
    }
}
