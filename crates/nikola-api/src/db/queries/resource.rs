//! Generic resource table queries.
//!
//! Table and column names come from the validated schema and are quoted;
//! row values are always bound as parameters.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde_json::{Map, Value};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Column, Row, Sqlite, TypeInfo, ValueRef};

use crate::db::DbPool;
use crate::error::AppResult;
use crate::schema::{AppSchema, ResourceDef, ID_COLUMN};

/// A row rendered as a JSON object, keys in column order.
pub type JsonRow = Map<String, Value>;

type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// Quote an identifier for SQLite.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// `CREATE TABLE IF NOT EXISTS` statement for a resource.
pub fn create_table_sql(resource: &ResourceDef) -> String {
    let mut columns = vec![format!(
        "{} INTEGER PRIMARY KEY AUTOINCREMENT",
        quote_ident(ID_COLUMN)
    )];
    columns.extend(
        resource
            .fields
            .iter()
            .map(|(name, field)| format!("{} {}", quote_ident(name), field.field_type.sql_type())),
    );

    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quote_ident(&resource.name),
        columns.join(", ")
    )
}

/// `INSERT ... RETURNING *` statement binding one parameter per field.
pub fn insert_sql(resource: &ResourceDef) -> String {
    let table = quote_ident(&resource.name);
    if resource.fields.is_empty() {
        return format!("INSERT INTO {} DEFAULT VALUES RETURNING *", table);
    }

    let columns: Vec<String> = resource.field_names().map(quote_ident).collect();
    let placeholders = vec!["?"; columns.len()];

    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING *",
        table,
        columns.join(", "),
        placeholders.join(", ")
    )
}

/// Create every resource table that does not exist yet.
///
/// Existing tables are left as they are.
pub async fn init_tables(pool: &DbPool, schema: &AppSchema) -> AppResult<()> {
    for resource in &schema.resources {
        sqlx::query(&create_table_sql(resource))
            .execute(pool)
            .await?;

        tracing::debug!(
            table = %resource.name,
            columns = resource.fields.len() + 1,
            "Table ensured"
        );
    }

    tracing::info!(tables = schema.resources.len(), "Database tables initialized");
    Ok(())
}

/// Insert a row and return it as stored.
///
/// Values are taken from `data` in field declaration order; absent keys
/// insert `NULL` and keys that are not declared fields are ignored.
pub async fn insert_row(
    pool: &DbPool,
    resource: &ResourceDef,
    data: &Map<String, Value>,
) -> AppResult<JsonRow> {
    let sql = insert_sql(resource);

    let mut query = sqlx::query(&sql);
    for field in resource.field_names() {
        query = bind_json(query, data.get(field).unwrap_or(&Value::Null));
    }

    let row = query.fetch_one(pool).await?;
    Ok(row_to_json(&row)?)
}

/// Get a single row by id.
pub async fn get_row(pool: &DbPool, resource: &ResourceDef, id: i64) -> AppResult<Option<JsonRow>> {
    let sql = format!(
        "SELECT * FROM {} WHERE {} = ?",
        quote_ident(&resource.name),
        quote_ident(ID_COLUMN)
    );

    let row = sqlx::query(&sql).bind(id).fetch_optional(pool).await?;

    match row {
        Some(row) => Ok(Some(row_to_json(&row)?)),
        None => Ok(None),
    }
}

/// List every row of a resource in insertion order.
pub async fn list_rows(pool: &DbPool, resource: &ResourceDef) -> AppResult<Vec<JsonRow>> {
    let sql = format!(
        "SELECT * FROM {} ORDER BY {}",
        quote_ident(&resource.name),
        quote_ident(ID_COLUMN)
    );

    let rows = sqlx::query(&sql).fetch_all(pool).await?;

    let mut results = Vec::with_capacity(rows.len());
    for row in &rows {
        results.push(row_to_json(row)?);
    }

    Ok(results)
}

/// Bind a JSON value using the closest SQLite storage class.
///
/// Arrays and objects are stored as their JSON text.
fn bind_json<'q>(query: SqliteQuery<'q>, value: &Value) -> SqliteQuery<'q> {
    match value {
        Value::Null => query.bind(Option::<String>::None),
        Value::Bool(b) => query.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                query.bind(i)
            } else {
                query.bind(n.as_f64())
            }
        }
        Value::String(s) => query.bind(s.clone()),
        Value::Array(_) | Value::Object(_) => query.bind(value.to_string()),
    }
}

/// Convert a row to a JSON object.
pub fn row_to_json(row: &SqliteRow) -> Result<JsonRow, sqlx::Error> {
    let mut obj = Map::new();

    for (idx, column) in row.columns().iter().enumerate() {
        obj.insert(column.name().to_string(), row_value_to_json(row, idx)?);
    }

    Ok(obj)
}

/// Convert a single column value, dispatching on its storage class.
fn row_value_to_json(row: &SqliteRow, idx: usize) -> Result<Value, sqlx::Error> {
    let type_name = {
        let raw = row.try_get_raw(idx)?;
        if raw.is_null() {
            return Ok(Value::Null);
        }
        raw.type_info().name().to_string()
    };

    let value = match type_name.as_str() {
        "INTEGER" | "BOOLEAN" => Value::from(row.try_get::<i64, _>(idx)?),
        "REAL" | "NUMERIC" => {
            let v: f64 = row.try_get(idx)?;
            serde_json::Number::from_f64(v)
                .map(Value::Number)
                .unwrap_or(Value::Null)
        }
        "BLOB" => {
            let bytes: Vec<u8> = row.try_get(idx)?;
            Value::String(BASE64.encode(bytes))
        }
        _ => Value::String(row.try_get::<String, _>(idx)?),
    };

    Ok(value)
}
