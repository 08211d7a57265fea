//! WebSocket layer: upgrade handling, per-connection loop, wire envelope.
//!
//! The endpoint at `/ws` registers one session per socket, pushes
//! notifications routed to it, and accepts `send-notification` and `ping`
//! events from the client.

pub mod connection;
pub mod handler;
pub mod messages;
