//! Concurrent registry of live connections.
//!
//! [`ConnectionRegistry`] owns every [`Session`] together with the
//! [`GroupIndex`] that addresses them by user id. Both live behind one
//! [`tokio::sync::RwLock`], so connect and disconnect update the session
//! map and the group index in a single critical section and readers never
//! observe one without the other.

use std::collections::HashMap;

use tokio::sync::RwLock;

use super::session::{Outbox, Session, SessionSummary};
use super::{GroupIndex, SessionId};
use crate::error::RelayError;

#[derive(Debug, Default)]
struct RegistryState {
    sessions: HashMap<SessionId, Session>,
    groups: GroupIndex,
}

/// Central store for all live sessions.
///
/// One instance per running server, shared through an `Arc`.
///
/// # Concurrency
///
/// - Lookups (`is_live`, `count`, `sessions_for`, ...) take the read lock
///   and run concurrently.
/// - `connect`, `disconnect` and `shutdown` take the write lock.
/// - No lock is held across a push; callers get cloned [`Outbox`] handles.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    state: RwLock<RegistryState>,
}

impl ConnectionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new connection under a freshly generated session id.
    ///
    /// If `user_id` is present and non-empty the session joins that user's
    /// group.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::DuplicateSession`] if the generated id is
    /// already live (not expected with UUID v4).
    pub async fn connect(
        &self,
        user_id: Option<String>,
        outbox: Outbox,
    ) -> Result<SessionId, RelayError> {
        self.register(Session::new(SessionId::new(), user_id, outbox))
            .await
    }

    /// Inserts a pre-built session record.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::DuplicateSession`] if a session with the same
    /// id is already live. The existing session is left untouched.
    pub async fn register(&self, session: Session) -> Result<SessionId, RelayError> {
        let session_id = session.session_id;
        let mut state = self.state.write().await;
        if state.sessions.contains_key(&session_id) {
            return Err(RelayError::DuplicateSession(session_id));
        }
        if let Some(user_id) = session.user_id.as_deref() {
            state.groups.add_to_group(user_id, session_id);
        }
        state.sessions.insert(session_id, session);
        drop(state);

        tracing::debug!(%session_id, "session registered");
        Ok(session_id)
    }

    /// Removes a session and its group membership.
    ///
    /// Unknown ids are a no-op returning `None`, since a disconnect may race
    /// with [`ConnectionRegistry::shutdown`].
    pub async fn disconnect(&self, session_id: SessionId) -> Option<Session> {
        let mut state = self.state.write().await;
        let session = state.sessions.remove(&session_id)?;
        if let Some(user_id) = session.user_id.as_deref() {
            state.groups.remove_from_group(user_id, session_id);
        }
        Some(session)
    }

    /// Returns `true` if the session is still registered.
    pub async fn is_live(&self, session_id: SessionId) -> bool {
        self.state.read().await.sessions.contains_key(&session_id)
    }

    /// Returns the push handle of a live session.
    pub async fn outbox(&self, session_id: SessionId) -> Option<Outbox> {
        self.state
            .read()
            .await
            .sessions
            .get(&session_id)
            .map(|s| s.outbox.clone())
    }

    /// Number of live sessions.
    pub async fn count(&self) -> usize {
        self.state.read().await.sessions.len()
    }

    /// Returns `true` if no session is live.
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.sessions.is_empty()
    }

    /// Ids of every live session, sorted for stable output.
    pub async fn list_session_ids(&self) -> Vec<SessionId> {
        let mut ids: Vec<SessionId> = self.state.read().await.sessions.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Ids of every live session, in no particular order.
    pub async fn all_session_ids(&self) -> Vec<SessionId> {
        self.state.read().await.sessions.keys().copied().collect()
    }

    /// Ids of the live sessions registered under `user_id`.
    pub async fn sessions_for(&self, user_id: &str) -> Vec<SessionId> {
        self.state
            .read()
            .await
            .groups
            .sessions_for(user_id)
            .into_iter()
            .collect()
    }

    /// Number of users with at least one live session.
    pub async fn group_count(&self) -> usize {
        self.state.read().await.groups.group_count()
    }

    /// Summaries of every live session, ordered by session id.
    pub async fn summaries(&self) -> Vec<SessionSummary> {
        let mut summaries: Vec<SessionSummary> = self
            .state
            .read()
            .await
            .sessions
            .values()
            .map(SessionSummary::from)
            .collect();
        summaries.sort_by_key(|s| s.session_id);
        summaries
    }

    /// Drops every session at once, returning how many were live.
    ///
    /// Dropping the sessions drops their outboxes, which ends each
    /// connection's writer loop.
    pub async fn shutdown(&self) -> usize {
        let mut state = self.state.write().await;
        let dropped = state.sessions.len();
        state.sessions.clear();
        state.groups.clear();
        dropped
    }
}
