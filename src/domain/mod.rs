//! Domain layer: sessions, the group index, the connection registry, and
//! notification value objects.
//!
//! Everything that holds shared mutable state lives here. The
//! [`ConnectionRegistry`] is the only owner of [`Session`] records and of
//! the [`GroupIndex`].

pub mod group_index;
pub mod notification;
pub mod registry;
pub mod session;
pub mod session_id;

pub use group_index::GroupIndex;
pub use notification::{Notification, NotificationDraft, Recipient};
pub use registry::ConnectionRegistry;
pub use session::{Outbox, Session, SessionSummary};
pub use session_id::SessionId;
