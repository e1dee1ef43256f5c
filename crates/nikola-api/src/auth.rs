//! Static API key authentication.
//!
//! Resource routes require the `X-API-KEY` header to match the configured
//! key. The check runs as route middleware, ahead of resource lookup.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;

use crate::error::AppError;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// The configured API key.
#[derive(Clone)]
pub struct ApiKey(Arc<str>);

impl ApiKey {
    pub fn new(key: impl AsRef<str>) -> Self {
        Self(Arc::from(key.as_ref()))
    }

    /// Compare a presented key in constant time.
    pub fn matches(&self, presented: Option<&str>) -> bool {
        match presented {
            Some(value) => value.as_bytes().ct_eq(self.0.as_bytes()).into(),
            None => false,
        }
    }
}

fn presented_key(headers: &HeaderMap) -> Option<&str> {
    headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok())
}

/// Middleware rejecting requests without a valid `X-API-KEY`.
pub async fn require_api_key(
    State(key): State<ApiKey>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !key.matches(presented_key(request.headers())) {
        tracing::warn!(
            method = %request.method(),
            path = %request.uri().path(),
            "Rejected request with invalid or missing API key"
        );
        return Err(AppError::Auth("Invalid or missing X-API-KEY".to_string()));
    }

    Ok(next.run(request).await)
}
