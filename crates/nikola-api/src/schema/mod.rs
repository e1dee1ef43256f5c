//! Resource schema for the Nikola API server.
//!
//! The schema is loaded once at startup and shared read-only with every
//! handler.

mod loader;
mod types;

pub use loader::{load_schema, parse_json, parse_yaml, validate, SchemaError};
pub use types::{AppSchema, FieldDef, FieldType, ResourceDef, ID_COLUMN};
