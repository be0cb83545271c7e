use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::features::trips::handlers;
use crate::features::trips::services::TripService;

/// Trip routes that need no credential
pub fn public_routes(service: Arc<TripService>) -> Router {
    Router::new()
        .route("/trips", get(handlers::list_trips))
        .route("/trips/top", get(handlers::top_trips))
        .route("/trips/q/{keyword}", get(handlers::search_trips))
        .route("/trips/{id}", get(handlers::get_trip))
        .with_state(service)
}

/// Trip routes behind the JWT middleware. Unlike guides, creating a trip
/// already requires a credential.
pub fn protected_routes(service: Arc<TripService>) -> Router {
    Router::new()
        .route("/trips", post(handlers::create_trip))
        .route("/trips/{id}", put(handlers::update_trip))
        .route("/trips/{id}", delete(handlers::delete_trip))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::Actor;
    use crate::shared::test_helpers::{
        seed_guide, seed_province, seed_tourist, seed_trip, setup_test_pool, test_media_store,
        with_actor,
    };
    use axum_test::multipart::MultipartForm;
    use axum_test::TestServer;
    use serde_json::Value;
    use sqlx::SqlitePool;

    async fn setup() -> (TestServer, SqlitePool) {
        let pool = setup_test_pool().await;
        let media = test_media_store().await;
        let service = Arc::new(TripService::new(pool.clone(), media));
        let app = public_routes(service.clone()).merge(with_actor(
            protected_routes(service),
            Actor::Admin(1),
        ));
        (TestServer::new(app).unwrap(), pool)
    }

    #[tokio::test]
    async fn create_trip_returns_nested_relations() {
        let (server, pool) = setup().await;
        let province = seed_province(&pool, "Phuket").await;
        let guide = seed_guide(&pool).await;

        let form = MultipartForm::new()
            .add_text("name", "Island hopping")
            .add_text("provinceId", province.to_string())
            .add_text("guideId", guide.to_string())
            .add_text("price", "2500");

        let response = server.post("/trips").multipart(form).await;

        assert_eq!(response.status_code(), 201);
        let body: Value = response.json();
        assert_eq!(body["message"], "Trip created successfully");
        assert_eq!(body["data"]["province"]["name"], "Phuket");
        assert_eq!(body["data"]["guide"]["id"], guide);
        assert_eq!(body["data"]["isActive"], true);
    }

    #[tokio::test]
    async fn create_trip_with_non_numeric_ids_is_rejected() {
        let (server, _pool) = setup().await;

        let form = MultipartForm::new()
            .add_text("name", "Island hopping")
            .add_text("provinceId", "abc")
            .add_text("guideId", "1");

        let response = server.post("/trips").multipart(form).await;

        assert_eq!(response.status_code(), 400);
        let body: Value = response.json();
        assert_eq!(body["message"], "Invalid provinceId or guideId");
    }

    #[tokio::test]
    async fn create_trip_with_tourist_id_as_guide_is_not_found() {
        let (server, pool) = setup().await;
        let province = seed_province(&pool, "Phuket").await;
        let tourist = seed_tourist(&pool).await;

        let form = MultipartForm::new()
            .add_text("name", "Island hopping")
            .add_text("provinceId", province.to_string())
            .add_text("guideId", tourist.to_string());

        let response = server.post("/trips").multipart(form).await;

        assert_eq!(response.status_code(), 404);
        let body: Value = response.json();
        assert_eq!(body["message"], "Guide not found");
    }

    #[tokio::test]
    async fn update_trip_with_bad_price_is_rejected() {
        let (server, pool) = setup().await;
        let province = seed_province(&pool, "Phuket").await;
        let guide = seed_guide(&pool).await;
        let trip = seed_trip(&pool, province, guide).await;

        let form = MultipartForm::new().add_text("price", "cheap");
        let response = server.put(&format!("/trips/{}", trip)).multipart(form).await;

        assert_eq!(response.status_code(), 400);
        let body: Value = response.json();
        assert_eq!(body["message"], "Invalid price");
    }

    #[tokio::test]
    async fn list_trips_rejects_non_numeric_province_filter() {
        let (server, _pool) = setup().await;

        let response = server.get("/trips?provinceId=abc").await;

        assert_eq!(response.status_code(), 400);
    }

    #[tokio::test]
    async fn get_missing_trip_returns_404() {
        let (server, _pool) = setup().await;

        let response = server.get("/trips/999").await;

        assert_eq!(response.status_code(), 404);
        let body: Value = response.json();
        assert_eq!(body["message"], "Trip not found");
    }
}
