use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::core::error::{AppError, Result};
use crate::features::auth::model::Actor;
use crate::features::bookings::dtos::{
    BookingDetailDto, BookingGuideDto, BookingTouristDto, BookingTripDto, CreateBookingRequestDto,
    UpdateBookingRequestDto,
};
use crate::features::bookings::models::{Booking, BookingStatus};
use crate::features::provinces::dtos::ProvinceResponseDto;

const BOOKING_SELECT: &str = r#"
    SELECT b.id, b.trip_id, b.tourist_id, b.guide_id, b.province_id,
           b.datetime, b.status, b.created_at,
           t.name AS trip_name, t.province_id AS trip_province_id,
           t.guide_id AS trip_guide_id, t.price AS trip_price,
           t.description AS trip_description, t.picture AS trip_picture,
           t.is_active AS trip_is_active,
           p.name AS province_name,
           tr.name AS tourist_name, tr.tel AS tourist_tel,
           g.name AS guide_name, g.experience AS guide_experience,
           g.language AS guide_language, g.tel AS guide_tel
    FROM bookings b
    INNER JOIN trips t ON t.id = b.trip_id
    INNER JOIN provinces p ON p.id = b.province_id
    INNER JOIN tourists tr ON tr.id = b.tourist_id
    INNER JOIN guides g ON g.id = b.guide_id
"#;

/// Booking joined with its trip, province, tourist and guide. The province
/// and guide joins go through the booking's own columns, not the trip's, so
/// the response reflects the snapshot taken at creation time.
#[derive(FromRow)]
struct BookingDetailRow {
    id: i64,
    trip_id: i64,
    tourist_id: i64,
    guide_id: i64,
    province_id: i64,
    datetime: DateTime<Utc>,
    status: BookingStatus,
    created_at: DateTime<Utc>,
    trip_name: String,
    trip_province_id: i64,
    trip_guide_id: i64,
    trip_price: Option<f64>,
    trip_description: Option<String>,
    trip_picture: Option<String>,
    trip_is_active: bool,
    province_name: String,
    tourist_name: String,
    tourist_tel: Option<String>,
    guide_name: String,
    guide_experience: Option<String>,
    guide_language: Option<String>,
    guide_tel: Option<String>,
}

impl From<BookingDetailRow> for BookingDetailDto {
    fn from(row: BookingDetailRow) -> Self {
        Self {
            id: row.id,
            trip_id: row.trip_id,
            tourist_id: row.tourist_id,
            guide_id: row.guide_id,
            province_id: row.province_id,
            datetime: row.datetime,
            status: row.status,
            created_at: row.created_at,
            trip: BookingTripDto {
                id: row.trip_id,
                name: row.trip_name,
                province_id: row.trip_province_id,
                guide_id: row.trip_guide_id,
                price: row.trip_price,
                description: row.trip_description,
                picture: row.trip_picture,
                is_active: row.trip_is_active,
            },
            province: ProvinceResponseDto {
                id: row.province_id,
                name: row.province_name,
            },
            tourist: BookingTouristDto {
                id: row.tourist_id,
                name: row.tourist_name,
                tel: row.tourist_tel,
            },
            guide: BookingGuideDto {
                id: row.guide_id,
                name: row.guide_name,
                experience: row.guide_experience,
                language: row.guide_language,
                tel: row.guide_tel,
            },
        }
    }
}

/// References copied onto a new booking from its trip
#[derive(FromRow)]
struct TripRefs {
    guide_id: i64,
    province_id: i64,
}

fn parse_instant(text: &str, message: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AppError::BadRequest(message.to_string()))
}

/// Service for booking operations
pub struct BookingService {
    pool: SqlitePool,
}

impl BookingService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List every booking, newest first
    pub async fn list(&self) -> Result<Vec<BookingDetailDto>> {
        let rows = sqlx::query_as::<_, BookingDetailRow>(&format!(
            "{} ORDER BY b.created_at DESC",
            BOOKING_SELECT
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch bookings: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List bookings scoped to the caller: a guide sees bookings assigned to
    /// them, a tourist sees their own, an admin sees everything.
    pub async fn list_for_actor(&self, actor: Actor) -> Result<Vec<BookingDetailDto>> {
        let (column, id) = match actor {
            Actor::Guide(id) => ("b.guide_id", id),
            Actor::Tourist(id) => ("b.tourist_id", id),
            Actor::Admin(_) => return self.list().await,
        };

        let rows = sqlx::query_as::<_, BookingDetailRow>(&format!(
            "{} WHERE {} = ? ORDER BY b.created_at DESC",
            BOOKING_SELECT, column
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch bookings for {:?}: {:?}", actor, e);
            AppError::Database(e)
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get one booking with everything it references
    pub async fn get(&self, id: i64) -> Result<BookingDetailDto> {
        sqlx::query_as::<_, BookingDetailRow>(&format!("{} WHERE b.id = ?", BOOKING_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch booking {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))
    }

    /// Create a booking for the caller. The guide and province ids are copied
    /// from the trip at this moment and never touched again; the caller's own
    /// id becomes the tourist id no matter their role.
    pub async fn create(
        &self,
        actor: Actor,
        request: CreateBookingRequestDto,
    ) -> Result<BookingDetailDto> {
        let datetime = parse_instant(&request.datetime, "Invalid datetime")?;

        let trip = sqlx::query_as::<_, TripRefs>(
            "SELECT guide_id, province_id FROM trips WHERE id = ?",
        )
        .bind(request.trip_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch trip {}: {:?}", request.trip_id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("Trip not found".to_string()))?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO bookings (trip_id, tourist_id, guide_id, province_id, datetime, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(request.trip_id)
        .bind(actor.id())
        .bind(trip.guide_id)
        .bind(trip.province_id)
        .bind(datetime)
        .bind(BookingStatus::Pending)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create booking: {:?}", e);
            AppError::Database(e)
        })?;

        self.get(id).await
    }

    /// Update a booking's datetime and/or status. A status change is only
    /// open to the guide the booking is assigned to; the ownership check runs
    /// before the value itself is looked at, so an outsider sending garbage
    /// still gets a 403 rather than a 400.
    pub async fn update(
        &self,
        actor: Actor,
        id: i64,
        request: UpdateBookingRequestDto,
    ) -> Result<BookingDetailDto> {
        let existing = self.find(id).await?;

        let status = match &request.status {
            Some(value) => {
                let owns = matches!(actor, Actor::Guide(guide_id) if guide_id == existing.guide_id);
                if !owns {
                    return Err(AppError::Forbidden(
                        "You are not allowed to update this booking".to_string(),
                    ));
                }
                let status = BookingStatus::parse(value)
                    .ok_or_else(|| AppError::BadRequest("Invalid status value".to_string()))?;
                Some(status)
            }
            None => None,
        };

        let datetime = match &request.datetime {
            Some(text) => Some(parse_instant(text, "Invalid datetime format")?),
            None => None,
        };

        sqlx::query(
            r#"
            UPDATE bookings SET
                datetime = COALESCE(?, datetime),
                status = COALESCE(?, status)
            WHERE id = ?
            "#,
        )
        .bind(datetime)
        .bind(status)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update booking {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        self.get(id).await
    }

    /// Cancel a booking by deleting its row
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete booking {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Booking not found".to_string()));
        }
        Ok(())
    }

    async fn find(&self, id: i64) -> Result<Booking> {
        sqlx::query_as::<_, Booking>(
            "SELECT id, trip_id, tourist_id, guide_id, province_id, datetime, status, created_at FROM bookings WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch booking {}: {:?}", id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{
        seed_booking, seed_guide, seed_province, seed_tourist, seed_trip, setup_test_pool,
    };
    use sqlx::SqlitePool;

    struct World {
        service: BookingService,
        pool: SqlitePool,
        province: i64,
        guide: i64,
        tourist: i64,
        trip: i64,
    }

    async fn world() -> World {
        let pool = setup_test_pool().await;
        let province = seed_province(&pool, "Phuket").await;
        let guide = seed_guide(&pool).await;
        let tourist = seed_tourist(&pool).await;
        let trip = seed_trip(&pool, province, guide).await;
        World {
            service: BookingService::new(pool.clone()),
            pool,
            province,
            guide,
            tourist,
            trip,
        }
    }

    fn create_request(trip_id: i64) -> CreateBookingRequestDto {
        CreateBookingRequestDto {
            trip_id,
            datetime: "2025-01-01T10:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn create_copies_trip_references_and_starts_pending() {
        let w = world().await;

        let booking = w
            .service
            .create(Actor::Tourist(w.tourist), create_request(w.trip))
            .await
            .unwrap();

        assert_eq!(booking.trip_id, w.trip);
        assert_eq!(booking.tourist_id, w.tourist);
        assert_eq!(booking.guide_id, w.guide);
        assert_eq!(booking.province_id, w.province);
        assert_eq!(booking.status, BookingStatus::Pending);
        assert!(!booking.tourist.name.is_empty());
        assert_eq!(booking.province.name, "Phuket");
    }

    #[tokio::test]
    async fn create_snapshot_survives_trip_reassignment() {
        let w = world().await;
        let booking = w
            .service
            .create(Actor::Tourist(w.tourist), create_request(w.trip))
            .await
            .unwrap();

        let other_guide = seed_guide(&w.pool).await;
        sqlx::query("UPDATE trips SET guide_id = ? WHERE id = ?")
            .bind(other_guide)
            .bind(w.trip)
            .execute(&w.pool)
            .await
            .unwrap();

        let after = w.service.get(booking.id).await.unwrap();
        assert_eq!(after.guide_id, w.guide);
        assert_eq!(after.trip.guide_id, other_guide);
    }

    #[tokio::test]
    async fn create_rejects_bad_datetime_and_missing_trip() {
        let w = world().await;

        let err = w
            .service
            .create(
                Actor::Tourist(w.tourist),
                CreateBookingRequestDto {
                    trip_id: w.trip,
                    datetime: "next tuesday".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(m) if m == "Invalid datetime"));

        let err = w
            .service
            .create(Actor::Tourist(w.tourist), create_request(999))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(m) if m == "Trip not found"));
    }

    #[tokio::test]
    async fn status_update_by_anyone_but_the_owning_guide_is_forbidden() {
        let w = world().await;
        let booking = seed_booking(&w.pool, w.trip, w.tourist, w.guide, w.province).await;
        let other_guide = seed_guide(&w.pool).await;

        for actor in [
            Actor::Tourist(w.tourist),
            Actor::Guide(other_guide),
            Actor::Admin(1),
        ] {
            let err = w
                .service
                .update(
                    actor,
                    booking,
                    UpdateBookingRequestDto {
                        status: Some("confirmed".to_string()),
                        ..Default::default()
                    },
                )
                .await
                .unwrap_err();
            assert!(
                matches!(err, AppError::Forbidden(m) if m == "You are not allowed to update this booking")
            );
        }

        // Even a garbage status value answers 403 for an outsider, the
        // ownership check comes first
        let err = w
            .service
            .update(
                Actor::Tourist(w.tourist),
                booking,
                UpdateBookingRequestDto {
                    status: Some("archived".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn owning_guide_can_set_every_status() {
        let w = world().await;
        let booking = seed_booking(&w.pool, w.trip, w.tourist, w.guide, w.province).await;

        // No transition graph, every value is reachable from every other,
        // including back to pending
        for status in ["confirmed", "rejected", "cancelled", "pending"] {
            let updated = w
                .service
                .update(
                    Actor::Guide(w.guide),
                    booking,
                    UpdateBookingRequestDto {
                        status: Some(status.to_string()),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();
            assert_eq!(updated.status.to_string(), status);
        }
    }

    #[tokio::test]
    async fn owning_guide_with_unknown_status_gets_rejected() {
        let w = world().await;
        let booking = seed_booking(&w.pool, w.trip, w.tourist, w.guide, w.province).await;

        let err = w
            .service
            .update(
                Actor::Guide(w.guide),
                booking,
                UpdateBookingRequestDto {
                    status: Some("archived".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::BadRequest(m) if m == "Invalid status value"));
    }

    #[tokio::test]
    async fn datetime_only_update_is_open_to_any_caller() {
        let w = world().await;
        let booking = seed_booking(&w.pool, w.trip, w.tourist, w.guide, w.province).await;
        let unrelated = seed_tourist(&w.pool).await;

        let updated = w
            .service
            .update(
                Actor::Tourist(unrelated),
                booking,
                UpdateBookingRequestDto {
                    datetime: Some("2025-06-01T08:30:00Z".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.datetime.to_rfc3339(), "2025-06-01T08:30:00+00:00");

        let err = w
            .service
            .update(
                Actor::Tourist(unrelated),
                booking,
                UpdateBookingRequestDto {
                    datetime: Some("01/06/2025".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(m) if m == "Invalid datetime format"));
    }

    #[tokio::test]
    async fn my_bookings_scopes_exactly_by_actor() {
        let w = world().await;
        let other_guide = seed_guide(&w.pool).await;
        let other_tourist = seed_tourist(&w.pool).await;
        let other_trip = seed_trip(&w.pool, w.province, other_guide).await;

        let mine = seed_booking(&w.pool, w.trip, w.tourist, w.guide, w.province).await;
        let same_guide = seed_booking(&w.pool, w.trip, other_tourist, w.guide, w.province).await;
        let unrelated =
            seed_booking(&w.pool, other_trip, other_tourist, other_guide, w.province).await;

        let as_tourist = w
            .service
            .list_for_actor(Actor::Tourist(w.tourist))
            .await
            .unwrap();
        assert_eq!(as_tourist.len(), 1);
        assert_eq!(as_tourist[0].id, mine);

        let as_guide = w
            .service
            .list_for_actor(Actor::Guide(w.guide))
            .await
            .unwrap();
        let mut guide_ids: Vec<i64> = as_guide.iter().map(|b| b.id).collect();
        guide_ids.sort_unstable();
        assert_eq!(guide_ids, vec![mine, same_guide]);

        let as_admin = w.service.list_for_actor(Actor::Admin(1)).await.unwrap();
        assert_eq!(as_admin.len(), 3);
        assert!(as_admin.iter().any(|b| b.id == unrelated));
    }

    #[tokio::test]
    async fn list_orders_newest_first() {
        let w = world().await;
        let first = seed_booking(&w.pool, w.trip, w.tourist, w.guide, w.province).await;
        let second = seed_booking(&w.pool, w.trip, w.tourist, w.guide, w.province).await;

        let bookings = w.service.list().await.unwrap();

        assert_eq!(bookings[0].id, second);
        assert_eq!(bookings[1].id, first);
    }

    #[tokio::test]
    async fn delete_removes_the_row_once() {
        let w = world().await;
        let booking = seed_booking(&w.pool, w.trip, w.tourist, w.guide, w.province).await;

        w.service.delete(booking).await.unwrap();
        let err = w.service.get(booking).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(m) if m == "Booking not found"));

        let err = w.service.delete(booking).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(m) if m == "Booking not found"));
    }
}
