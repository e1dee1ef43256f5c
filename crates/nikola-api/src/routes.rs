//! Router assembly.

use axum::{middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::{require_api_key, ApiKey};
use crate::handlers;
use crate::services::ResourceService;
use crate::state::AppState;

/// Build the application router with all routes.
pub fn build_router(state: AppState, resource_service: ResourceService) -> Router {
    // Browser clients call the API from any origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Health check routes (no auth required)
    let health_routes = Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/readyz", get(handlers::readyz))
        .with_state(state.clone());

    // Resource routes, gated by X-API-KEY
    let api_key = ApiKey::new(&state.config.api_key);
    let resource_routes = Router::new()
        .route(
            "/api/{resource}",
            get(handlers::resources::list).post(handlers::resources::create),
        )
        .route("/api/{resource}/{id}", get(handlers::resources::get))
        .route_layer(middleware::from_fn_with_state(api_key, require_api_key))
        .with_state(resource_service);

    Router::new()
        .merge(health_routes)
        .merge(resource_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
