//! WebSocket wire envelope: `{"event": <name>, "data": <value>}`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::dto::SendNotificationResponse;
use crate::domain::{Notification, NotificationDraft, SessionId};
use crate::error::{ErrorResponse, RelayError};

/// Raw envelope as received from a client.
#[derive(Debug, Clone, Deserialize)]
pub struct WsFrame {
    /// Event name.
    pub event: String,
    /// Event payload; `null` when omitted.
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Events a client can send.
#[derive(Debug, Clone)]
pub enum ClientEvent {
    /// `send-notification`: submit a notification for delivery.
    SendNotification(NotificationDraft),
    /// `ping`: liveness probe, answered with `pong`.
    Ping,
    /// Any other event name.
    Unknown(String),
}

impl ClientEvent {
    /// Parses a text frame.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Validation`] if the frame is not a JSON
    /// envelope, or if a `send-notification` payload is not an object.
    pub fn parse(text: &str) -> Result<Self, RelayError> {
        let frame: WsFrame = serde_json::from_str(text)
            .map_err(|_| RelayError::Validation("malformed frame".to_string()))?;

        match frame.event.as_str() {
            "send-notification" => {
                let draft = if frame.data.is_null() {
                    NotificationDraft::default()
                } else {
                    serde_json::from_value(frame.data).map_err(|err| {
                        RelayError::Validation(format!("invalid notification payload: {err}"))
                    })?
                };
                Ok(Self::SendNotification(draft))
            }
            "ping" => Ok(Self::Ping),
            _ => Ok(Self::Unknown(frame.event)),
        }
    }
}

/// Events the server sends, serialized as `{"event", "data"}`.
#[derive(Debug, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent<'a> {
    /// Sent once, right after the session is registered.
    Connected {
        /// Id of the new session.
        #[serde(rename = "sessionId")]
        session_id: SessionId,
        /// User the session was registered under, if any.
        #[serde(rename = "userId")]
        user_id: Option<&'a str>,
    },
    /// A pushed notification.
    Notification(&'a Notification),
    /// Reply to `ping`.
    Pong {
        /// Server time of the reply.
        timestamp: DateTime<Utc>,
    },
    /// Acknowledgement of a `send-notification` from this client.
    NotificationSent(&'a SendNotificationResponse),
    /// A rejected client event.
    Error(&'a ErrorResponse),
}

impl ServerEvent<'_> {
    /// Serializes the event into a text frame payload.
    ///
    /// # Errors
    ///
    /// Returns the serializer error; not expected for these types.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn parses_send_notification() {
        let raw = r#"{"event":"send-notification","data":{"type":"alert","message":"hi","recipient":"u1"}}"#;
        let Ok(ClientEvent::SendNotification(draft)) = ClientEvent::parse(raw) else {
            panic!("expected send-notification");
        };
        assert_eq!(draft.kind.as_deref(), Some("alert"));
        assert_eq!(draft.recipient.as_deref(), Some("u1"));
    }

    #[test]
    fn send_notification_without_data_is_empty_draft() {
        let Ok(ClientEvent::SendNotification(draft)) =
            ClientEvent::parse(r#"{"event":"send-notification"}"#)
        else {
            panic!("expected send-notification");
        };
        assert!(draft.kind.is_none());
        assert!(draft.message.is_none());
    }

    #[test]
    fn parses_ping_with_or_without_data() {
        assert!(matches!(
            ClientEvent::parse(r#"{"event":"ping"}"#),
            Ok(ClientEvent::Ping)
        ));
        assert!(matches!(
            ClientEvent::parse(r#"{"event":"ping","data":{"t":1}}"#),
            Ok(ClientEvent::Ping)
        ));
    }

    #[test]
    fn unknown_event_is_kept() {
        let Ok(ClientEvent::Unknown(name)) = ClientEvent::parse(r#"{"event":"dance"}"#) else {
            panic!("expected unknown event");
        };
        assert_eq!(name, "dance");
    }

    #[test]
    fn garbage_is_validation_error() {
        assert!(matches!(
            ClientEvent::parse("not json"),
            Err(RelayError::Validation(_))
        ));
        assert!(matches!(
            ClientEvent::parse(r#"{"event":"send-notification","data":[1,2]}"#),
            Err(RelayError::Validation(_))
        ));
    }

    #[test]
    fn server_events_use_envelope() {
        let id = SessionId::new();
        let Ok(json) = (ServerEvent::Connected {
            session_id: id,
            user_id: Some("u1"),
        })
        .to_json() else {
            panic!("serialization failed");
        };
        let Ok(value) = serde_json::from_str::<serde_json::Value>(&json) else {
            panic!("invalid json");
        };
        assert_eq!(value["event"], "connected");
        assert_eq!(value["data"]["sessionId"], id.to_string());
        assert_eq!(value["data"]["userId"], "u1");
    }

    #[test]
    fn notification_event_carries_wire_payload() {
        let Ok(n) = Notification::try_from(NotificationDraft::new("alert", "hi", None)) else {
            panic!("draft should validate");
        };
        let Ok(json) = ServerEvent::Notification(&n).to_json() else {
            panic!("serialization failed");
        };
        let Ok(value) = serde_json::from_str::<serde_json::Value>(&json) else {
            panic!("invalid json");
        };
        assert_eq!(value["event"], "notification");
        assert_eq!(value["data"]["_id"], n.id.as_str());
        assert_eq!(value["data"]["recipient"], "all");
    }

    #[test]
    fn ack_event_name_is_kebab_case() {
        let Ok(n) = Notification::try_from(NotificationDraft::new("alert", "hi", None)) else {
            panic!("draft should validate");
        };
        let ack = SendNotificationResponse {
            success: true,
            notification: n,
            delivered_count: 3,
        };
        let Ok(json) = ServerEvent::NotificationSent(&ack).to_json() else {
            panic!("serialization failed");
        };
        assert!(json.contains(r#""event":"notification-sent""#));
        assert!(json.contains(r#""deliveredCount":3"#));
    }
}
