//! # notify-relay
//!
//! Real-time notification relay. Clients hold WebSocket connections,
//! optionally identified by a user id, and receive notifications addressed
//! to that user or broadcast to everyone. `POST /send-notification` injects
//! a notification without holding a connection.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)        POST /send-notification, GET /status
//!     ├── WS Handler (ws/)            /ws?userId=...
//!     │
//!     ├── NotificationRouter (service/)
//!     │
//!     └── ConnectionRegistry + GroupIndex (domain/)
//! ```
//!
//! Delivery is best effort: a notification reaches the sessions that are
//! live when it is routed, and nothing is stored afterwards.

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod server;
pub mod service;
pub mod ws;
