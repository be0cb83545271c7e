use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::features::tourists::handlers;
use crate::features::tourists::services::TouristService;

/// Tourist routes that need no credential
pub fn public_routes(service: Arc<TouristService>) -> Router {
    Router::new()
        .route("/tourists", get(handlers::list_tourists))
        .route("/tourists/{id}", get(handlers::get_tourist))
        .route("/tourists", post(handlers::create_tourist))
        .with_state(service)
}

/// Tourist routes behind the JWT middleware
pub fn protected_routes(service: Arc<TouristService>) -> Router {
    Router::new()
        .route("/tourists/{id}", put(handlers::update_tourist))
        .route("/tourists/{id}", delete(handlers::delete_tourist))
        .with_state(service)
}
