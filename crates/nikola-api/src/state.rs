//! Application state for the Nikola API server.
//!
//! This module defines the shared application state that is
//! passed to handlers via Axum's state management.

use crate::config::AppConfig;
use crate::db::DbPool;
use crate::schema::AppSchema;
use std::sync::Arc;

/// Shared application state.
///
/// Cloned into every handler; the heavy parts sit behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: DbPool,

    /// Application configuration
    pub config: Arc<AppConfig>,

    /// Loaded resource schema
    pub schema: Arc<AppSchema>,

    /// Server start time for uptime calculation
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: DbPool, config: AppConfig, schema: AppSchema) -> Self {
        Self {
            db,
            config: Arc::new(config),
            schema: Arc::new(schema),
            start_time: std::time::Instant::now(),
        }
    }

    /// Get the server uptime in seconds.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Application name from the schema, if any.
    pub fn app_name(&self) -> Option<&str> {
        self.schema.name.as_deref()
    }
}
