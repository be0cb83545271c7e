use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::contact::handlers;
use crate::features::contact::services::ContactService;

/// Contact routes. Submitting the form requires a credential.
pub fn protected_routes(service: Arc<ContactService>) -> Router {
    Router::new()
        .route("/contact", post(handlers::send_contact))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::Actor;
    use crate::modules::mail::NoopMailer;
    use crate::shared::test_helpers::{setup_test_pool, with_actor};
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use sqlx::SqlitePool;

    async fn setup() -> (TestServer, SqlitePool) {
        let pool = setup_test_pool().await;
        let service = Arc::new(ContactService::new(pool.clone(), Arc::new(NoopMailer)));
        let app = with_actor(protected_routes(service), Actor::Tourist(1));
        (TestServer::new(app).unwrap(), pool)
    }

    #[tokio::test]
    async fn valid_submission_is_stored() {
        let (server, pool) = setup().await;

        let response = server
            .post("/contact")
            .json(&json!({
                "name": "Malee",
                "email": "malee@example.com",
                "message": "Which months are best?"
            }))
            .await;

        assert_eq!(response.status_code(), 200);
        let body: Value = response.json();
        assert_eq!(body["status"], "success");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contacts")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn empty_message_is_rejected() {
        let (server, pool) = setup().await;

        let response = server
            .post("/contact")
            .json(&json!({
                "name": "Malee",
                "email": "malee@example.com",
                "message": ""
            }))
            .await;

        assert_eq!(response.status_code(), 400);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contacts")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
