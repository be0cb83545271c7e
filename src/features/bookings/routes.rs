use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::features::bookings::handlers;
use crate::features::bookings::services::BookingService;

/// Booking routes. Every one of them sits behind the JWT middleware.
pub fn protected_routes(service: Arc<BookingService>) -> Router {
    Router::new()
        .route("/bookings", get(handlers::list_bookings))
        .route("/bookings/my-bookings", get(handlers::my_bookings))
        .route("/bookings/{id}", get(handlers::get_booking))
        .route("/bookings", post(handlers::create_booking))
        .route("/bookings/{id}", put(handlers::update_booking))
        .route("/bookings/{id}", delete(handlers::delete_booking))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::Actor;
    use crate::shared::test_helpers::{
        seed_booking, seed_guide, seed_province, seed_tourist, seed_trip, setup_test_pool,
        with_actor,
    };
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use sqlx::SqlitePool;

    async fn setup() -> (Arc<BookingService>, SqlitePool) {
        let pool = setup_test_pool().await;
        (Arc::new(BookingService::new(pool.clone())), pool)
    }

    fn server_as(service: Arc<BookingService>, actor: Actor) -> TestServer {
        TestServer::new(with_actor(protected_routes(service), actor)).unwrap()
    }

    #[tokio::test]
    async fn booking_lifecycle_for_a_phuket_trip() {
        let (service, pool) = setup().await;
        let province = seed_province(&pool, "Phuket").await;
        let guide = seed_guide(&pool).await;
        let tourist = seed_tourist(&pool).await;
        let trip = seed_trip(&pool, province, guide).await;

        // The tourist books the trip
        let as_tourist = server_as(service.clone(), Actor::Tourist(tourist));
        let response = as_tourist
            .post("/bookings")
            .json(&json!({"tripId": trip, "datetime": "2025-01-01T10:00:00Z"}))
            .await;
        assert_eq!(response.status_code(), 201);
        let body: Value = response.json();
        assert_eq!(body["message"], "Booking created successfully");
        assert_eq!(body["data"]["touristId"], tourist);
        assert_eq!(body["data"]["guideId"], guide);
        assert_eq!(body["data"]["provinceId"], province);
        assert_eq!(body["data"]["status"], "pending");
        let booking_id = body["data"]["id"].as_i64().unwrap();

        // The assigned guide confirms it
        let as_guide = server_as(service.clone(), Actor::Guide(guide));
        let response = as_guide
            .put(&format!("/bookings/{}", booking_id))
            .json(&json!({"status": "confirmed"}))
            .await;
        assert_eq!(response.status_code(), 200);
        let body: Value = response.json();
        assert_eq!(body["data"]["status"], "confirmed");

        // The tourist cannot touch the status, not even back to pending
        let response = as_tourist
            .put(&format!("/bookings/{}", booking_id))
            .json(&json!({"status": "pending"}))
            .await;
        assert_eq!(response.status_code(), 403);
        let body: Value = response.json();
        assert_eq!(body["message"], "You are not allowed to update this booking");
    }

    #[tokio::test]
    async fn create_with_non_numeric_trip_id_is_rejected() {
        let (service, pool) = setup().await;
        let tourist = seed_tourist(&pool).await;

        let server = server_as(service, Actor::Tourist(tourist));
        let response = server
            .post("/bookings")
            .json(&json!({"tripId": "abc", "datetime": "2025-01-01T10:00:00Z"}))
            .await;

        assert_eq!(response.status_code(), 400);
    }

    #[tokio::test]
    async fn my_bookings_returns_only_the_callers_rows() {
        let (service, pool) = setup().await;
        let province = seed_province(&pool, "Phuket").await;
        let guide = seed_guide(&pool).await;
        let mine = seed_tourist(&pool).await;
        let other = seed_tourist(&pool).await;
        let trip = seed_trip(&pool, province, guide).await;
        let my_booking = seed_booking(&pool, trip, mine, guide, province).await;
        seed_booking(&pool, trip, other, guide, province).await;

        let server = server_as(service, Actor::Tourist(mine));
        let response = server.get("/bookings/my-bookings").await;

        assert_eq!(response.status_code(), 200);
        let body: Value = response.json();
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["id"], my_booking);
        assert_eq!(data[0]["tourist"]["id"], mine);
    }

    #[tokio::test]
    async fn cancel_reports_cancelled_and_then_404() {
        let (service, pool) = setup().await;
        let province = seed_province(&pool, "Phuket").await;
        let guide = seed_guide(&pool).await;
        let tourist = seed_tourist(&pool).await;
        let trip = seed_trip(&pool, province, guide).await;
        let booking = seed_booking(&pool, trip, tourist, guide, province).await;

        let server = server_as(service, Actor::Tourist(tourist));

        let response = server.delete(&format!("/bookings/{}", booking)).await;
        assert_eq!(response.status_code(), 200);
        let body: Value = response.json();
        assert_eq!(body["message"], "Booking cancelled successfully");

        let response = server.delete(&format!("/bookings/{}", booking)).await;
        assert_eq!(response.status_code(), 404);
        let body: Value = response.json();
        assert_eq!(body["message"], "Booking not found");
    }

    #[tokio::test]
    async fn non_numeric_booking_id_is_rejected_before_lookup() {
        let (service, _pool) = setup().await;

        let server = server_as(service, Actor::Admin(1));
        let response = server.get("/bookings/abc").await;

        assert_eq!(response.status_code(), 400);
    }
}
