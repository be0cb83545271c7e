use std::sync::Arc;

use sqlx::{FromRow, SqlitePool};

use crate::core::error::{AppError, Result};
use crate::features::provinces::dtos::ProvinceResponseDto;
use crate::features::trips::dtos::{
    CreateTripRequest, TopTripDto, TripGuideDto, TripResponseDto, UpdateTripRequest,
};
use crate::modules::storage::{MediaStore, UploadedPicture};
use crate::shared::constants::{ROLE_GUIDE, TOP_LIST_LIMIT};
use crate::shared::validation::contains_pattern;

const TRIP_SELECT: &str = r#"
    SELECT t.id, t.name, t.province_id, t.guide_id, t.price, t.description,
           t.picture, t.is_active,
           p.name AS province_name,
           g.name AS guide_name
    FROM trips t
    INNER JOIN provinces p ON p.id = t.province_id
    INNER JOIN guides g ON g.id = t.guide_id
"#;

/// Trip joined with its province and guide names
#[derive(FromRow)]
struct TripWithRelationsRow {
    id: i64,
    name: String,
    province_id: i64,
    guide_id: i64,
    price: Option<f64>,
    description: Option<String>,
    picture: Option<String>,
    is_active: bool,
    province_name: String,
    guide_name: String,
}

impl From<TripWithRelationsRow> for TripResponseDto {
    fn from(row: TripWithRelationsRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            province_id: row.province_id,
            guide_id: row.guide_id,
            price: row.price,
            description: row.description,
            picture: row.picture,
            is_active: row.is_active,
            province: ProvinceResponseDto {
                id: row.province_id,
                name: row.province_name,
            },
            guide: TripGuideDto {
                id: row.guide_id,
                name: row.guide_name,
            },
        }
    }
}

/// Trip row plus its booking count, for the top-trips list
#[derive(FromRow)]
struct TopTripRow {
    #[sqlx(flatten)]
    trip: TripWithRelationsRow,
    bookings_count: i64,
}

/// Service for trip operations
pub struct TripService {
    pool: SqlitePool,
    media: Arc<MediaStore>,
}

impl TripService {
    pub fn new(pool: SqlitePool, media: Arc<MediaStore>) -> Self {
        Self { pool, media }
    }

    /// List trips, optionally narrowed to one province
    pub async fn list(&self, province_id: Option<i64>) -> Result<Vec<TripResponseDto>> {
        let rows = match province_id {
            Some(province_id) => {
                sqlx::query_as::<_, TripWithRelationsRow>(&format!(
                    "{} WHERE t.province_id = ? ORDER BY t.id ASC",
                    TRIP_SELECT
                ))
                .bind(province_id)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, TripWithRelationsRow>(&format!(
                    "{} ORDER BY t.id ASC",
                    TRIP_SELECT
                ))
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| {
            tracing::error!("Failed to fetch trips: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Search trips by trip name or province name, ordered by trip name
    pub async fn search(&self, keyword: &str) -> Result<Vec<TripResponseDto>> {
        let pattern = contains_pattern(keyword);
        let rows = sqlx::query_as::<_, TripWithRelationsRow>(&format!(
            r#"{} WHERE t.name LIKE ? ESCAPE '\' OR p.name LIKE ? ESCAPE '\' ORDER BY t.name ASC"#,
            TRIP_SELECT
        ))
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to search trips: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a trip with its province and guide
    pub async fn get(&self, id: i64) -> Result<TripResponseDto> {
        sqlx::query_as::<_, TripWithRelationsRow>(&format!("{} WHERE t.id = ?", TRIP_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch trip {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Trip not found".to_string()))
    }

    /// Top trips by how many bookings they carry
    pub async fn top(&self) -> Result<Vec<TopTripDto>> {
        let rows = sqlx::query_as::<_, TopTripRow>(
            r#"
            SELECT t.id, t.name, t.province_id, t.guide_id, t.price, t.description,
                   t.picture, t.is_active,
                   p.name AS province_name,
                   g.name AS guide_name,
                   COUNT(b.id) AS bookings_count
            FROM trips t
            INNER JOIN provinces p ON p.id = t.province_id
            INNER JOIN guides g ON g.id = t.guide_id
            LEFT JOIN bookings b ON b.trip_id = t.id
            GROUP BY t.id
            ORDER BY bookings_count DESC, t.id ASC
            LIMIT ?
            "#,
        )
        .bind(TOP_LIST_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch top trips: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(rows
            .into_iter()
            .map(|row| TopTripDto {
                trip: row.trip.into(),
                bookings_count: row.bookings_count,
            })
            .collect())
    }

    /// Create a trip after checking both references: the province must exist
    /// and the guide id must belong to an account that still has the GUIDE
    /// role.
    pub async fn create(
        &self,
        request: CreateTripRequest,
        picture: Option<UploadedPicture>,
    ) -> Result<TripResponseDto> {
        let province: Option<i64> = sqlx::query_scalar("SELECT id FROM provinces WHERE id = ?")
            .bind(request.province_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to check province {}: {:?}", request.province_id, e);
                AppError::Database(e)
            })?;
        if province.is_none() {
            return Err(AppError::NotFound("Province not found".to_string()));
        }

        let guide_role: Option<String> = sqlx::query_scalar("SELECT role FROM guides WHERE id = ?")
            .bind(request.guide_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to check guide {}: {:?}", request.guide_id, e);
                AppError::Database(e)
            })?;
        if guide_role.as_deref() != Some(ROLE_GUIDE) {
            return Err(AppError::NotFound("Guide not found".to_string()));
        }

        let picture_name = match &picture {
            Some(p) => Some(self.media.save(&p.original_name, &p.data).await?),
            None => None,
        };

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO trips (name, province_id, guide_id, price, description, picture, is_active)
            VALUES (?, ?, ?, ?, ?, ?, TRUE)
            RETURNING id
            "#,
        )
        .bind(&request.name)
        .bind(request.province_id)
        .bind(request.guide_id)
        .bind(request.price)
        .bind(&request.description)
        .bind(&picture_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create trip: {:?}", e);
            AppError::Database(e)
        })?;

        self.get(id).await
    }

    /// Update a trip. Absent fields keep their current value; a new picture
    /// replaces the stored file name. Changed province or guide ids are not
    /// re-checked here, a dangling id fails on the foreign keys.
    pub async fn update(
        &self,
        id: i64,
        request: UpdateTripRequest,
        picture: Option<UploadedPicture>,
    ) -> Result<TripResponseDto> {
        let existing = self.get(id).await?;

        let picture_name = match &picture {
            Some(p) => Some(self.media.save(&p.original_name, &p.data).await?),
            None => existing.picture,
        };

        sqlx::query(
            r#"
            UPDATE trips SET
                name = COALESCE(?, name),
                province_id = COALESCE(?, province_id),
                guide_id = COALESCE(?, guide_id),
                price = COALESCE(?, price),
                description = COALESCE(?, description),
                is_active = COALESCE(?, is_active),
                picture = ?
            WHERE id = ?
            "#,
        )
        .bind(&request.name)
        .bind(request.province_id)
        .bind(request.guide_id)
        .bind(request.price)
        .bind(&request.description)
        .bind(request.is_active)
        .bind(&picture_name)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update trip {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        self.get(id).await
    }

    /// Delete a trip and its bookings inside one transaction
    pub async fn delete(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to open transaction: {:?}", e);
            AppError::Database(e)
        })?;

        sqlx::query("DELETE FROM bookings WHERE trip_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete bookings for trip {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        let result = sqlx::query("DELETE FROM trips WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete trip {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        // Dropping the transaction rolls the booking deletes back
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Trip not found".to_string()));
        }

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit trip delete: {:?}", e);
            AppError::Database(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{
        seed_booking, seed_guide, seed_province, seed_tourist, seed_trip, setup_test_pool,
        test_media_store,
    };
    use sqlx::SqlitePool;

    async fn service() -> (TripService, SqlitePool) {
        let pool = setup_test_pool().await;
        let media = test_media_store().await;
        (TripService::new(pool.clone(), media), pool)
    }

    fn create_request(province_id: i64, guide_id: i64) -> CreateTripRequest {
        CreateTripRequest {
            name: "Island hopping".to_string(),
            province_id,
            guide_id,
            price: Some(2500.0),
            description: Some("Three islands in one day".to_string()),
        }
    }

    #[tokio::test]
    async fn create_returns_trip_with_relations() {
        let (service, pool) = service().await;
        let province = seed_province(&pool, "Phuket").await;
        let guide = seed_guide(&pool).await;

        let trip = service
            .create(create_request(province, guide), None)
            .await
            .unwrap();

        assert_eq!(trip.name, "Island hopping");
        assert_eq!(trip.price, Some(2500.0));
        assert!(trip.is_active);
        assert_eq!(trip.province.name, "Phuket");
        assert_eq!(trip.guide.id, guide);
    }

    #[tokio::test]
    async fn create_rejects_missing_province() {
        let (service, pool) = service().await;
        let guide = seed_guide(&pool).await;

        let err = service
            .create(create_request(999, guide), None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(m) if m == "Province not found"));
    }

    #[tokio::test]
    async fn create_rejects_guide_id_without_guide_role() {
        let (service, pool) = service().await;
        let province = seed_province(&pool, "Phuket").await;

        // A tourist id is not a guide id, the tables are separate
        let tourist = seed_tourist(&pool).await;
        let err = service
            .create(create_request(province, tourist), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(m) if m == "Guide not found"));

        // Same for an account in the guides table that lost the role
        let demoted = seed_guide(&pool).await;
        sqlx::query("UPDATE guides SET role = 'ADMIN' WHERE id = ?")
            .bind(demoted)
            .execute(&pool)
            .await
            .unwrap();
        let err = service
            .create(create_request(province, demoted), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(m) if m == "Guide not found"));
    }

    #[tokio::test]
    async fn list_filters_by_province() {
        let (service, pool) = service().await;
        let phuket = seed_province(&pool, "Phuket").await;
        let krabi = seed_province(&pool, "Krabi").await;
        let guide = seed_guide(&pool).await;
        let in_phuket = seed_trip(&pool, phuket, guide).await;
        seed_trip(&pool, krabi, guide).await;

        let all = service.list(None).await.unwrap();
        assert_eq!(all.len(), 2);

        let filtered = service.list(Some(phuket)).await.unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, in_phuket);
        assert_eq!(filtered[0].province.name, "Phuket");
    }

    #[tokio::test]
    async fn search_matches_trip_or_province_name() {
        let (service, pool) = service().await;
        let phuket = seed_province(&pool, "Phuket").await;
        let krabi = seed_province(&pool, "Krabi").await;
        let guide = seed_guide(&pool).await;
        let island = seed_trip(&pool, phuket, guide).await;
        sqlx::query("UPDATE trips SET name = 'Island hopping' WHERE id = ?")
            .bind(island)
            .execute(&pool)
            .await
            .unwrap();
        seed_trip(&pool, krabi, guide).await;

        let by_name = service.search("Island").await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, island);

        let by_province = service.search("rabi").await.unwrap();
        assert_eq!(by_province.len(), 1);
        assert_eq!(by_province[0].province.name, "Krabi");
    }

    #[tokio::test]
    async fn top_orders_by_booking_count() {
        let (service, pool) = service().await;
        let province = seed_province(&pool, "Phuket").await;
        let guide = seed_guide(&pool).await;
        let tourist = seed_tourist(&pool).await;
        let busy = seed_trip(&pool, province, guide).await;
        let quiet = seed_trip(&pool, province, guide).await;
        seed_booking(&pool, busy, tourist, guide, province).await;
        seed_booking(&pool, busy, tourist, guide, province).await;
        seed_booking(&pool, quiet, tourist, guide, province).await;

        let top = service.top().await.unwrap();

        assert_eq!(top[0].trip.id, busy);
        assert_eq!(top[0].bookings_count, 2);
        assert_eq!(top[1].trip.id, quiet);
        assert_eq!(top[1].bookings_count, 1);
    }

    #[tokio::test]
    async fn update_keeps_absent_fields() {
        let (service, pool) = service().await;
        let province = seed_province(&pool, "Phuket").await;
        let guide = seed_guide(&pool).await;
        let created = service
            .create(create_request(province, guide), None)
            .await
            .unwrap();

        let updated = service
            .update(
                created.id,
                UpdateTripRequest {
                    price: Some(9000.0),
                    is_active: Some(false),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Island hopping");
        assert_eq!(updated.price, Some(9000.0));
        assert!(!updated.is_active);
        assert_eq!(updated.description.as_deref(), Some("Three islands in one day"));
    }

    #[tokio::test]
    async fn update_with_dangling_guide_id_hits_foreign_keys() {
        let (service, pool) = service().await;
        let province = seed_province(&pool, "Phuket").await;
        let guide = seed_guide(&pool).await;
        let trip = seed_trip(&pool, province, guide).await;

        let err = service
            .update(
                trip,
                UpdateTripRequest {
                    guide_id: Some(999),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Database(_)));
    }

    #[tokio::test]
    async fn delete_cascades_bookings_and_spares_relations() {
        let (service, pool) = service().await;
        let province = seed_province(&pool, "Phuket").await;
        let guide = seed_guide(&pool).await;
        let tourist = seed_tourist(&pool).await;
        let trip = seed_trip(&pool, province, guide).await;
        seed_booking(&pool, trip, tourist, guide, province).await;

        service.delete(trip).await.unwrap();

        let bookings: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
            .fetch_one(&pool)
            .await
            .unwrap();
        let trips: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM trips")
            .fetch_one(&pool)
            .await
            .unwrap();
        let guides: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM guides")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!((bookings, trips, guides), (0, 0, 1));

        let err = service.delete(trip).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(m) if m == "Trip not found"));
    }
}
