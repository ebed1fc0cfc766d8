//! HTTP handlers for astro-service.

pub mod content;
pub mod health;
pub mod orders;
pub mod webhook;

pub use health::{health_check, metrics_endpoint, root};
