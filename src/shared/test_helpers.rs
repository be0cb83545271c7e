#[cfg(test)]
use crate::features::auth::model::Actor;

#[cfg(test)]
use axum::{extract::Request, middleware::Next, Router};

#[cfg(test)]
use chrono::Utc;

#[cfg(test)]
use fake::{faker::name::en::Name, Fake};

#[cfg(test)]
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

#[cfg(test)]
use std::str::FromStr;

#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use uuid::Uuid;

#[cfg(test)]
use crate::core::config::MediaConfig;

#[cfg(test)]
use crate::modules::storage::MediaStore;

/// In-memory pool for tests. A single connection, since every connection to
/// `:memory:` opens its own database.
#[cfg(test)]
#[allow(dead_code)]
pub async fn setup_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();

    sqlx::migrate!("./migrations").run(&pool).await.unwrap();

    pool
}

/// Media store rooted in a fresh temporary directory
#[cfg(test)]
#[allow(dead_code)]
pub async fn test_media_store() -> Arc<MediaStore> {
    let dir = std::env::temp_dir().join(format!("media-{}", Uuid::new_v4()));
    let store = MediaStore::new(&MediaConfig {
        dir: dir.to_string_lossy().into_owned(),
    });
    store.ensure_dir().await.unwrap();
    Arc::new(store)
}

/// Layer a router so every request carries the given actor, bypassing the
/// JWT middleware
#[cfg(test)]
#[allow(dead_code)]
pub fn with_actor(router: Router, actor: Actor) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| async move {
            request.extensions_mut().insert(actor);
            next.run(request).await
        },
    ))
}

#[cfg(test)]
#[allow(dead_code)]
pub async fn seed_province(pool: &SqlitePool, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO provinces (name) VALUES (?) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[cfg(test)]
#[allow(dead_code)]
pub async fn seed_admin(pool: &SqlitePool, email: &str, password_hash: &str) -> i64 {
    let name: String = Name().fake();
    sqlx::query_scalar(
        "INSERT INTO admins (name, email, password_hash) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[cfg(test)]
#[allow(dead_code)]
pub async fn seed_guide(pool: &SqlitePool) -> i64 {
    let name: String = Name().fake();
    let email = format!("{}@example.com", Uuid::new_v4());
    sqlx::query_scalar(
        r#"
        INSERT INTO guides (name, email, password_hash, tel, language, experience)
        VALUES (?, ?, 'x', '0812345678', 'English', '5 years')
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(email)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[cfg(test)]
#[allow(dead_code)]
pub async fn seed_tourist(pool: &SqlitePool) -> i64 {
    let name: String = Name().fake();
    let email = format!("{}@example.com", Uuid::new_v4());
    sqlx::query_scalar(
        "INSERT INTO tourists (name, email, password_hash) VALUES (?, ?, 'x') RETURNING id",
    )
    .bind(name)
    .bind(email)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[cfg(test)]
#[allow(dead_code)]
pub async fn seed_trip(pool: &SqlitePool, province_id: i64, guide_id: i64) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO trips (name, province_id, guide_id, price, description)
        VALUES ('City tour', ?, ?, 1500.0, 'A day around town')
        RETURNING id
        "#,
    )
    .bind(province_id)
    .bind(guide_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[cfg(test)]
#[allow(dead_code)]
pub async fn seed_booking(
    pool: &SqlitePool,
    trip_id: i64,
    tourist_id: i64,
    guide_id: i64,
    province_id: i64,
) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO bookings (trip_id, tourist_id, guide_id, province_id, datetime, status, created_at)
        VALUES (?, ?, ?, ?, ?, 'pending', ?)
        RETURNING id
        "#,
    )
    .bind(trip_id)
    .bind(tourist_id)
    .bind(guide_id)
    .bind(province_id)
    .bind(Utc::now())
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .unwrap()
}
