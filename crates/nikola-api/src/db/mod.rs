//! Database module for the Nikola API server.
//!
//! This module provides database connectivity and the generic table
//! queries for SQLite using SQLx.

pub mod pool;
pub mod queries;

pub use pool::{create_pool, health_check, DbPool};
