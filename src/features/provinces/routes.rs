use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::features::provinces::handlers;
use crate::features::provinces::services::ProvinceService;

/// Province routes that need no credential
pub fn public_routes(service: Arc<ProvinceService>) -> Router {
    Router::new()
        .route("/provinces", get(handlers::list_provinces))
        .route("/provinces/{id}", get(handlers::get_province))
        .with_state(service)
}

/// Province routes behind the JWT middleware
pub fn protected_routes(service: Arc<ProvinceService>) -> Router {
    Router::new()
        .route("/provinces", post(handlers::create_province))
        .route("/provinces/{id}", put(handlers::update_province))
        .route("/provinces/{id}", delete(handlers::delete_province))
        .with_state(service)
}
