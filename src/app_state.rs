//! Shared application state injected into all Axum handlers.

use std::sync::Arc;
use std::time::Instant;

use crate::domain::ConnectionRegistry;
use crate::service::NotificationRouter;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
///
/// One instance per running server; every field is a cheap handle.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Live connection registry.
    pub registry: Arc<ConnectionRegistry>,
    /// Notification router over the same registry.
    pub router: NotificationRouter,
    /// Capacity of each new connection's push buffer.
    pub push_buffer_capacity: usize,
    /// Process start, for uptime reporting.
    pub started_at: Instant,
}

impl AppState {
    /// Builds state around a fresh, empty registry.
    #[must_use]
    pub fn new(push_buffer_capacity: usize) -> Self {
        let registry = Arc::new(ConnectionRegistry::new());
        let router = NotificationRouter::new(Arc::clone(&registry));
        Self {
            registry,
            router,
            push_buffer_capacity: push_buffer_capacity.max(1),
            started_at: Instant::now(),
        }
    }

    /// Seconds since this state was created.
    #[must_use]
    pub fn uptime_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}
