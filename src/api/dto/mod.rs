//! Data Transfer Objects for REST request/response serialization.
//!
//! Field names are camelCase on the wire to match what push clients
//! already consume.

pub mod notification_dto;
pub mod status_dto;

pub use notification_dto::*;
pub use status_dto::*;
