//! HTTP transport and the JSON shapes exchanged with the portal server.

pub mod api;
pub mod types;
