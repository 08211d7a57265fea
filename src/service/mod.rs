//! Service layer: notification routing.
//!
//! [`NotificationRouter`] validates notifications, resolves the delivery
//! set through the [`crate::domain::ConnectionRegistry`], and pushes to
//! each live session.

pub mod notification_router;

pub use notification_router::{DeliveryReport, NotificationRouter};
