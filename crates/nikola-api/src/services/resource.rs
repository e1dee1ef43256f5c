//! Resource service: schema lookup in front of the generic table queries.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::db::queries::resource::{self as queries, JsonRow};
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::schema::{AppSchema, ResourceDef};

/// Service for resource operations.
#[derive(Clone)]
pub struct ResourceService {
    pool: DbPool,
    schema: Arc<AppSchema>,
}

impl ResourceService {
    /// Create a new resource service.
    pub fn new(pool: DbPool, schema: Arc<AppSchema>) -> Self {
        Self { pool, schema }
    }

    /// List all rows of a resource.
    pub async fn list(&self, resource: &str) -> AppResult<Vec<JsonRow>> {
        let def = self.resolve(resource)?;
        queries::list_rows(&self.pool, def).await
    }

    /// Insert a row built from `data` and return the stored row.
    ///
    /// `data` may be absent or `null`, in which case every field is `NULL`.
    pub async fn create(&self, resource: &str, data: Option<Value>) -> AppResult<JsonRow> {
        let def = self.resolve(resource)?;

        let data = match data {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map,
            Some(_) => {
                return Err(AppError::Validation(
                    "'data' must be a JSON object".to_string(),
                ))
            }
        };

        let row = queries::insert_row(&self.pool, def, &data).await?;

        tracing::debug!(resource = %def.name, id = ?row.get("id"), "Row created");

        Ok(row)
    }

    /// Get a single row by id.
    pub async fn get(&self, resource: &str, id: i64) -> AppResult<JsonRow> {
        let def = self.resolve(resource)?;
        queries::get_row(&self.pool, def, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item {} not found in '{}'", id, def.name)))
    }

    fn resolve(&self, resource: &str) -> AppResult<&ResourceDef> {
        self.schema
            .resource(resource)
            .ok_or_else(|| AppError::NotFound("Resource not found".to_string()))
    }
}
