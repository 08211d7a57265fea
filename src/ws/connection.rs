//! Per-connection read/write loop.
//!
//! Registers the socket as a session, forwards pushed notifications from
//! the session's outbox, and dispatches client events. The session is
//! removed from the registry on every exit path.

use axum::extract::ws::{CloseFrame, Message, WebSocket};
use chrono::Utc;
use futures_util::{Sink, SinkExt, StreamExt};
use tokio::sync::mpsc;

use super::messages::{ClientEvent, ServerEvent};
use crate::api::dto::SendNotificationResponse;
use crate::app_state::AppState;
use crate::error::RelayError;
use crate::service::NotificationRouter;

/// Runs the lifecycle of a single WebSocket connection.
///
/// - Registers a session (joining `user_id`'s group when given).
/// - Forwards notifications from the session outbox to the client.
/// - Handles `send-notification` and `ping` events from the client.
/// - Disconnects the session when either side goes away.
pub async fn run_connection(socket: WebSocket, user_id: Option<String>, state: AppState) {
    let (outbox, mut inbox) = mpsc::channel(state.push_buffer_capacity);
    let (mut ws_tx, mut ws_rx) = socket.split();

    let session_id = match state.registry.connect(user_id.clone(), outbox).await {
        Ok(id) => id,
        Err(err) => {
            tracing::error!(error = %err, "session registration failed");
            let _ = ws_tx.send(Message::Close(None)).await;
            return;
        }
    };
    let user_id = user_id.filter(|u| !u.is_empty());
    tracing::info!(%session_id, user_id = ?user_id, "client connected");

    let greeting = ServerEvent::Connected {
        session_id,
        user_id: user_id.as_deref(),
    };
    let mut reason = if send_event(&mut ws_tx, &greeting).await {
        None
    } else {
        Some("transport error".to_string())
    };

    while reason.is_none() {
        tokio::select! {
            // Incoming frame from client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let reply = handle_text_message(text.as_str(), &state.router).await;
                        if let Some(reply) = reply
                            && ws_tx.send(Message::text(reply)).await.is_err()
                        {
                            reason = Some("transport error".to_string());
                        }
                    }
                    Some(Ok(Message::Close(frame))) => reason = Some(close_reason(frame.as_ref())),
                    Some(Ok(_)) => {}
                    Some(Err(err)) => reason = Some(format!("transport error: {err}")),
                    None => reason = Some("client went away".to_string()),
                }
            }
            // Notification routed to this session
            pushed = inbox.recv() => {
                match pushed {
                    Some(notification) => {
                        let event = ServerEvent::Notification(&notification);
                        if !send_event(&mut ws_tx, &event).await {
                            reason = Some("transport error".to_string());
                        }
                    }
                    None => {
                        let _ = ws_tx.send(Message::Close(None)).await;
                        reason = Some("registry shutdown".to_string());
                    }
                }
            }
        }
    }

    state.registry.disconnect(session_id).await;
    tracing::info!(
        %session_id,
        user_id = ?user_id,
        reason = reason.as_deref().unwrap_or("unknown"),
        "client disconnected"
    );
}

/// Serializes and sends one server event. Returns `false` if the socket
/// rejected the write.
async fn send_event<S>(ws_tx: &mut S, event: &ServerEvent<'_>) -> bool
where
    S: Sink<Message> + Unpin,
{
    match event.to_json() {
        Ok(json) => ws_tx.send(Message::text(json)).await.is_ok(),
        Err(err) => {
            tracing::error!(error = %err, "failed to serialize server event");
            true
        }
    }
}

/// Handles a text frame from the client, returning an optional reply.
async fn handle_text_message(text: &str, router: &NotificationRouter) -> Option<String> {
    let event = match ClientEvent::parse(text) {
        Ok(event) => event,
        Err(err) => return error_reply(&err),
    };

    match event {
        ClientEvent::SendNotification(draft) => match router.submit(draft).await {
            Ok((notification, report)) => {
                let ack = SendNotificationResponse::delivered(notification, &report);
                ServerEvent::NotificationSent(&ack).to_json().ok()
            }
            Err(err) => error_reply(&err),
        },
        ClientEvent::Ping => ServerEvent::Pong {
            timestamp: Utc::now(),
        }
        .to_json()
        .ok(),
        ClientEvent::Unknown(name) => {
            tracing::debug!(event = %name, "unknown client event");
            error_reply(&RelayError::Validation(format!("unknown event: {name}")))
        }
    }
}

fn error_reply(err: &RelayError) -> Option<String> {
    ServerEvent::Error(&err.to_body()).to_json().ok()
}

fn close_reason(frame: Option<&CloseFrame>) -> String {
    match frame {
        Some(frame) if frame.reason.as_str().is_empty() => {
            format!("client closed ({})", frame.code)
        }
        Some(frame) => format!("client closed ({}: {})", frame.code, frame.reason.as_str()),
        None => "client closed".to_string(),
    }
}
