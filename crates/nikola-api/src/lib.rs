//! Nikola API Library
//!
//! A schema-driven CRUD server. A declarative resource schema names the
//! resources and their typed fields; at startup one SQLite table is
//! ensured per resource and every resource is served through the same
//! generic endpoints:
//!
//! - `GET /healthz` and `GET /readyz`
//! - `GET /api/{resource}` lists items
//! - `POST /api/{resource}` creates an item from `{"data": {...}}`
//! - `GET /api/{resource}/{id}` fetches one item
//!
//! Resource routes require an `X-API-KEY` header.
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading from environment variables
//! - [`schema`]: Schema loading, validation and type mapping
//! - [`db`]: SQLite pool and generic table queries
//! - [`auth`]: API key middleware
//! - [`services`]: Resource lookup and row operations
//! - [`handlers`]: HTTP route handlers
//! - [`error`]: Custom error types with Axum integration
//!
//! ## Example
//!
//! ```ignore
//! use nikola_api::{
//!     config::{AppConfig, DatabaseConfig},
//!     db::{create_pool, queries::resource::init_tables},
//!     routes::build_router,
//!     schema::load_schema,
//!     services::ResourceService,
//!     state::AppState,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let app_config = AppConfig::from_env()?;
//!     let schema = load_schema(&app_config.schema_path)?;
//!     let db_pool = create_pool(&DatabaseConfig::from_env()?).await?;
//!     init_tables(&db_pool, &schema).await?;
//!     let state = AppState::new(db_pool.clone(), app_config, schema);
//!     let app = build_router(state.clone(), ResourceService::new(db_pool, state.schema.clone()));
//!     // ... bind and serve
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod result_ext;
pub mod routes;
pub mod schema;
pub mod services;
pub mod state;

pub use error::{AppError, AppResult};
pub use result_ext::ResultExt;
