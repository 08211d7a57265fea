//! Secondary index from user identifier to that user's live sessions.

use std::collections::{HashMap, HashSet};

use super::SessionId;

/// Maps each `user_id` to the set of session ids currently registered
/// under it.
///
/// Not synchronized on its own: the [`super::ConnectionRegistry`] keeps it
/// behind the same lock as the session map so both always change together.
/// Groups are created on first insert and removed as soon as they empty.
#[derive(Debug, Default)]
pub struct GroupIndex {
    groups: HashMap<String, HashSet<SessionId>>,
}

impl GroupIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `session_id` to the group for `user_id`. Idempotent.
    pub fn add_to_group(&mut self, user_id: &str, session_id: SessionId) {
        self.groups
            .entry(user_id.to_string())
            .or_default()
            .insert(session_id);
    }

    /// Removes `session_id` from the group for `user_id`, dropping the group
    /// when it becomes empty. Idempotent.
    pub fn remove_from_group(&mut self, user_id: &str, session_id: SessionId) {
        let Some(members) = self.groups.get_mut(user_id) else {
            return;
        };
        members.remove(&session_id);
        if members.is_empty() {
            self.groups.remove(user_id);
        }
    }

    /// Returns the sessions registered under `user_id`; empty if none.
    #[must_use]
    pub fn sessions_for(&self, user_id: &str) -> HashSet<SessionId> {
        self.groups.get(user_id).cloned().unwrap_or_default()
    }

    /// Number of non-empty groups.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if no user has a live session.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.groups.clear();
    }
}
