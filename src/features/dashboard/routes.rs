use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::dashboard::handlers;
use crate::features::dashboard::services::DashboardService;

/// Dashboard routes. The path says admin but the endpoint has never asked
/// for a credential.
pub fn public_routes(service: Arc<DashboardService>) -> Router {
    Router::new()
        .route("/admin/dashboard", get(handlers::get_dashboard))
        .with_state(service)
}
