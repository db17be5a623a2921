// Read-only HTTP surface over the engine state
pub mod status_service;

pub use status_service::{routes, StatusContext};
