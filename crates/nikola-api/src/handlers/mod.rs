//! HTTP handlers for the Nikola API.

pub mod health;
pub mod resources;

pub use health::{healthz, readyz};
