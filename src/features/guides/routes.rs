use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::features::guides::handlers;
use crate::features::guides::services::GuideService;

/// Guide routes that need no credential. Accounts can be created here as an
/// alternative to /auth/register.
pub fn public_routes(service: Arc<GuideService>) -> Router {
    Router::new()
        .route("/guides", get(handlers::list_guides))
        .route("/guides/top", get(handlers::top_guides))
        .route("/guides/q/{keyword}", get(handlers::search_guides))
        .route("/guides/{id}", get(handlers::get_guide))
        .route("/guides", post(handlers::create_guide))
        .with_state(service)
}

/// Guide routes behind the JWT middleware
pub fn protected_routes(service: Arc<GuideService>) -> Router {
    Router::new()
        .route("/guides/{id}", put(handlers::update_guide))
        .route("/guides/{id}", delete(handlers::delete_guide))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::Actor;
    use crate::shared::test_helpers::{
        seed_guide, setup_test_pool, test_media_store, with_actor,
    };
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use serde_json::Value;
    use sqlx::SqlitePool;

    async fn setup() -> (TestServer, SqlitePool) {
        let pool = setup_test_pool().await;
        let media = test_media_store().await;
        let service = Arc::new(GuideService::new(pool.clone(), media));
        let app = public_routes(service.clone()).merge(with_actor(
            protected_routes(service),
            Actor::Admin(1),
        ));
        (TestServer::new(app).unwrap(), pool)
    }

    #[tokio::test]
    async fn create_guide_via_multipart_stores_picture() {
        let (server, _pool) = setup().await;

        let form = MultipartForm::new()
            .add_text("name", "Somchai")
            .add_text("email", "somchai@example.com")
            .add_text("password", "secret123")
            .add_text("tel", "0812345678")
            .add_part(
                "picture",
                Part::bytes(b"fake image".to_vec()).file_name("somchai.jpg"),
            );

        let response = server.post("/guides").multipart(form).await;

        assert_eq!(response.status_code(), 201);
        let body: Value = response.json();
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"]["role"], "GUIDE");
        assert_eq!(body["data"]["status"], true);
        assert!(body["data"]["picture"].as_str().unwrap().ends_with(".jpg"));
        assert!(body["data"].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn create_guide_without_name_is_rejected() {
        let (server, _pool) = setup().await;

        let form = MultipartForm::new()
            .add_text("email", "x@example.com")
            .add_text("password", "secret123");

        let response = server.post("/guides").multipart(form).await;

        assert_eq!(response.status_code(), 400);
        let body: Value = response.json();
        assert_eq!(body["message"], "Name is required");
    }

    #[tokio::test]
    async fn update_with_role_field_is_rejected() {
        let (server, pool) = setup().await;
        let guide = seed_guide(&pool).await;

        let form = MultipartForm::new().add_text("role", "ADMIN");
        let response = server.put(&format!("/guides/{}", guide)).multipart(form).await;

        assert_eq!(response.status_code(), 400);
        let body: Value = response.json();
        assert_eq!(body["message"], "Role cannot be updated");
    }

    #[tokio::test]
    async fn update_parses_status_flag() {
        let (server, pool) = setup().await;
        let guide = seed_guide(&pool).await;

        let form = MultipartForm::new().add_text("status", "false");
        let response = server.put(&format!("/guides/{}", guide)).multipart(form).await;

        assert_eq!(response.status_code(), 200);
        let body: Value = response.json();
        assert_eq!(body["data"]["status"], false);
    }

    #[tokio::test]
    async fn delete_missing_guide_returns_404() {
        let (server, _pool) = setup().await;

        let response = server.delete("/guides/999").await;

        assert_eq!(response.status_code(), 404);
        let body: Value = response.json();
        assert_eq!(body["message"], "Guide not found");
    }
}
