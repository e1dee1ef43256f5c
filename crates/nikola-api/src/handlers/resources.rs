//! Generic resource handlers.
//!
//! One set of handlers serves every resource in the schema; the resource
//! name comes from the path.

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::db::queries::resource::JsonRow;
use crate::error::{AppError, AppResult};
use crate::services::ResourceService;

/// Body of a create request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateItemRequest {
    /// Field values keyed by field name
    #[serde(default)]
    pub data: Option<Value>,
}

/// List all items of a resource.
///
/// `GET /api/{resource}`
///
/// ```json
/// [ { "id": 1, "title": "write docs", "done": 0 } ]
/// ```
pub async fn list(
    State(service): State<ResourceService>,
    Path(resource): Path<String>,
) -> AppResult<Json<Vec<JsonRow>>> {
    let rows = service.list(&resource).await?;
    Ok(Json(rows))
}

/// Create an item.
///
/// `POST /api/{resource}`
///
/// # Request Body
///
/// ```json
/// { "data": { "title": "write docs", "done": 0 } }
/// ```
///
/// Returns the stored row including its generated `id`. The body is read
/// as JSON whatever the `Content-Type` says.
pub async fn create(
    State(service): State<ResourceService>,
    Path(resource): Path<String>,
    body: Bytes,
) -> AppResult<Json<JsonRow>> {
    let request = parse_create_request(&body)?;
    let row = service.create(&resource, request.data).await?;
    Ok(Json(row))
}

/// Malformed JSON is a 400; well-formed JSON of the wrong shape, or no
/// body at all, is a 422.
fn parse_create_request(body: &[u8]) -> AppResult<CreateItemRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::Validation("Request body is required".to_string()));
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Malformed JSON body: {}", e)))?;

    if !value.is_object() {
        return Err(AppError::Validation(
            "Request body must be a JSON object".to_string(),
        ));
    }

    serde_json::from_value(value)
        .map_err(|e| AppError::Validation(format!("Invalid request body: {}", e)))
}

/// Get one item by id.
///
/// `GET /api/{resource}/{id}`
pub async fn get(
    State(service): State<ResourceService>,
    Path((resource, id)): Path<(String, i64)>,
) -> AppResult<Json<JsonRow>> {
    let row = service.get(&resource, id).await?;
    Ok(Json(row))
}
