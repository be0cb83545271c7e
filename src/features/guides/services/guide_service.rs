use std::sync::Arc;

use sqlx::{FromRow, SqlitePool};

use crate::core::error::{AppError, Result};
use crate::features::auth::services::hash_password;
use crate::features::guides::dtos::{
    CreateGuideRequest, GuideDetailDto, GuideResponseDto, GuideTripDto, TopGuideDto,
    UpdateGuideRequest,
};
use crate::features::guides::models::Guide;
use crate::features::provinces::dtos::ProvinceResponseDto;
use crate::modules::storage::{MediaStore, UploadedPicture};
use crate::shared::constants::{ROLE_GUIDE, TOP_LIST_LIMIT};
use crate::shared::validation::contains_pattern;

const GUIDE_COLUMNS: &str =
    "id, name, email, password_hash, tel, role, status, experience, language, picture";

/// Active trip joined with its province, flattened for the guide detail view
#[derive(FromRow)]
struct GuideTripRow {
    id: i64,
    name: String,
    province_id: i64,
    guide_id: i64,
    price: Option<f64>,
    description: Option<String>,
    picture: Option<String>,
    is_active: bool,
    province_name: String,
}

impl From<GuideTripRow> for GuideTripDto {
    fn from(row: GuideTripRow) -> Self {
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
        }
    }
}

/// Guide row plus its booking count, for the top-guides list
#[derive(FromRow)]
struct TopGuideRow {
    #[sqlx(flatten)]
    guide: Guide,
    bookings_count: i64,
}

/// Service for guide operations
pub struct GuideService {
    pool: SqlitePool,
    media: Arc<MediaStore>,
}

impl GuideService {
    pub fn new(pool: SqlitePool, media: Arc<MediaStore>) -> Self {
        Self { pool, media }
    }

    /// List every account that still carries the GUIDE role
    pub async fn list(&self) -> Result<Vec<Guide>> {
        sqlx::query_as::<_, Guide>(&format!(
            "SELECT {} FROM guides WHERE role = ? ORDER BY id ASC",
            GUIDE_COLUMNS
        ))
        .bind(ROLE_GUIDE)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch guides: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Search guides by name or language, ordered by name
    pub async fn search(&self, keyword: &str) -> Result<Vec<Guide>> {
        let pattern = contains_pattern(keyword);
        sqlx::query_as::<_, Guide>(&format!(
            r#"
            SELECT {}
            FROM guides
            WHERE name LIKE ? ESCAPE '\' OR language LIKE ? ESCAPE '\'
            ORDER BY name ASC
            "#,
            GUIDE_COLUMNS
        ))
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to search guides: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Top guides by how many bookings they carry
    pub async fn top(&self) -> Result<Vec<TopGuideDto>> {
        let rows = sqlx::query_as::<_, TopGuideRow>(
            r#"
            SELECT g.id, g.name, g.email, g.password_hash, g.tel, g.role, g.status,
                   g.experience, g.language, g.picture,
                   COUNT(b.id) AS bookings_count
            FROM guides g
            LEFT JOIN bookings b ON b.guide_id = g.id
            WHERE g.role = ?
            GROUP BY g.id
            ORDER BY bookings_count DESC, g.id ASC
            LIMIT ?
            "#,
        )
        .bind(ROLE_GUIDE)
        .bind(TOP_LIST_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch top guides: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(rows
            .into_iter()
            .map(|row| TopGuideDto {
                guide: row.guide.into(),
                bookings_count: row.bookings_count,
            })
            .collect())
    }

    /// Get a guide with its active trips and their provinces
    pub async fn get_detail(&self, id: i64) -> Result<GuideDetailDto> {
        let guide = self.find(id).await?;

        let trips = sqlx::query_as::<_, GuideTripRow>(
            r#"
            SELECT t.id, t.name, t.province_id, t.guide_id, t.price, t.description,
                   t.picture, t.is_active,
                   p.name AS province_name
            FROM trips t
            INNER JOIN provinces p ON p.id = t.province_id
            WHERE t.guide_id = ? AND t.is_active = TRUE
            ORDER BY t.id ASC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch trips for guide {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        Ok(GuideDetailDto {
            guide: guide.into(),
            trips: trips.into_iter().map(Into::into).collect(),
        })
    }

    /// Create a guide account with an optional picture
    pub async fn create(
        &self,
        request: CreateGuideRequest,
        picture: Option<UploadedPicture>,
    ) -> Result<GuideResponseDto> {
        let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM guides WHERE email = ?")
            .bind(&request.email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to check guide email: {:?}", e);
                AppError::Database(e)
            })?;

        if existing.is_some() {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }

        let password_hash = hash_password(request.password.clone()).await?;

        let picture_name = match &picture {
            Some(p) => Some(self.media.save(&p.original_name, &p.data).await?),
            None => None,
        };

        let guide = sqlx::query_as::<_, Guide>(&format!(
            r#"
            INSERT INTO guides (name, email, password_hash, tel, role, status, experience, language, picture)
            VALUES (?, ?, ?, ?, ?, TRUE, ?, ?, ?)
            RETURNING {}
            "#,
            GUIDE_COLUMNS
        ))
        .bind(&request.name)
        .bind(&request.email)
        .bind(&password_hash)
        .bind(&request.tel)
        .bind(ROLE_GUIDE)
        .bind(&request.experience)
        .bind(&request.language)
        .bind(&picture_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create guide: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(guide.into())
    }

    /// Update a guide. Absent fields keep their current value; a new picture
    /// replaces the stored file name.
    pub async fn update(
        &self,
        id: i64,
        request: UpdateGuideRequest,
        picture: Option<UploadedPicture>,
    ) -> Result<GuideResponseDto> {
        let existing = self.find(id).await?;

        let password_hash = match request.password {
            Some(password) => Some(hash_password(password).await?),
            None => None,
        };

        let picture_name = match &picture {
            Some(p) => Some(self.media.save(&p.original_name, &p.data).await?),
            None => existing.picture,
        };

        let guide = sqlx::query_as::<_, Guide>(&format!(
            r#"
            UPDATE guides SET
                name = COALESCE(?, name),
                email = COALESCE(?, email),
                password_hash = COALESCE(?, password_hash),
                tel = COALESCE(?, tel),
                experience = COALESCE(?, experience),
                language = COALESCE(?, language),
                status = COALESCE(?, status),
                picture = ?
            WHERE id = ?
            RETURNING {}
            "#,
            GUIDE_COLUMNS
        ))
        .bind(&request.name)
        .bind(&request.email)
        .bind(&password_hash)
        .bind(&request.tel)
        .bind(&request.experience)
        .bind(&request.language)
        .bind(request.status)
        .bind(&picture_name)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update guide {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        Ok(guide.into())
    }

    /// Delete a guide and everything hanging off it. Bookings go first, then
    /// trips, then the guide row itself, all inside one transaction.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to open transaction: {:?}", e);
            AppError::Database(e)
        })?;

        sqlx::query("DELETE FROM bookings WHERE guide_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete bookings for guide {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        sqlx::query("DELETE FROM trips WHERE guide_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete trips for guide {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        let result = sqlx::query("DELETE FROM guides WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete guide {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        // Dropping the transaction rolls the child deletes back
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Guide not found".to_string()));
        }

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit guide delete: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find(&self, id: i64) -> Result<Guide> {
        sqlx::query_as::<_, Guide>(&format!(
            "SELECT {} FROM guides WHERE id = ?",
            GUIDE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch guide {}: {:?}", id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("Guide not found".to_string()))
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

    async fn service() -> (GuideService, SqlitePool) {
        let pool = setup_test_pool().await;
        let media = test_media_store().await;
        (GuideService::new(pool.clone(), media), pool)
    }

    fn create_request(email: &str) -> CreateGuideRequest {
        CreateGuideRequest {
            name: "Somchai".to_string(),
            email: email.to_string(),
            password: "secret123".to_string(),
            tel: Some("0812345678".to_string()),
            experience: Some("5 years".to_string()),
            language: Some("English".to_string()),
        }
    }

    #[tokio::test]
    async fn list_returns_only_guide_role_rows() {
        let (service, pool) = service().await;
        seed_guide(&pool).await;
        let demoted = seed_guide(&pool).await;
        sqlx::query("UPDATE guides SET role = 'ADMIN' WHERE id = ?")
            .bind(demoted)
            .execute(&pool)
            .await
            .unwrap();

        let guides = service.list().await.unwrap();

        assert_eq!(guides.len(), 1);
        assert_ne!(guides[0].id, demoted);
    }

    #[tokio::test]
    async fn search_matches_name_or_language() {
        let (service, pool) = service().await;
        let a = seed_guide(&pool).await;
        let b = seed_guide(&pool).await;
        sqlx::query("UPDATE guides SET name = 'Anong', language = 'Thai' WHERE id = ?")
            .bind(a)
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("UPDATE guides SET name = 'Boon', language = 'French' WHERE id = ?")
            .bind(b)
            .execute(&pool)
            .await
            .unwrap();

        let by_name = service.search("nong").await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, a);

        let by_language = service.search("French").await.unwrap();
        assert_eq!(by_language.len(), 1);
        assert_eq!(by_language[0].id, b);

        assert!(service.search("zzz").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn top_orders_by_booking_count() {
        let (service, pool) = service().await;
        let province = seed_province(&pool, "Phuket").await;
        let busy = seed_guide(&pool).await;
        let quiet = seed_guide(&pool).await;
        let tourist = seed_tourist(&pool).await;
        let busy_trip = seed_trip(&pool, province, busy).await;
        let quiet_trip = seed_trip(&pool, province, quiet).await;
        seed_booking(&pool, busy_trip, tourist, busy, province).await;
        seed_booking(&pool, busy_trip, tourist, busy, province).await;
        seed_booking(&pool, quiet_trip, tourist, quiet, province).await;

        let top = service.top().await.unwrap();

        assert_eq!(top[0].guide.id, busy);
        assert_eq!(top[0].bookings_count, 2);
        assert_eq!(top[1].guide.id, quiet);
        assert_eq!(top[1].bookings_count, 1);
    }

    #[tokio::test]
    async fn detail_includes_only_active_trips() {
        let (service, pool) = service().await;
        let province = seed_province(&pool, "Phuket").await;
        let guide = seed_guide(&pool).await;
        let active = seed_trip(&pool, province, guide).await;
        let inactive = seed_trip(&pool, province, guide).await;
        sqlx::query("UPDATE trips SET is_active = FALSE WHERE id = ?")
            .bind(inactive)
            .execute(&pool)
            .await
            .unwrap();

        let detail = service.get_detail(guide).await.unwrap();

        assert_eq!(detail.trips.len(), 1);
        assert_eq!(detail.trips[0].id, active);
        assert_eq!(detail.trips[0].province.name, "Phuket");
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email() {
        let (service, _pool) = service().await;

        service
            .create(create_request("dup@example.com"), None)
            .await
            .unwrap();
        let err = service
            .create(create_request("dup@example.com"), None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(m) if m == "Email already exists"));
    }

    #[tokio::test]
    async fn update_rehashes_password() {
        let (service, pool) = service().await;
        let created = service
            .create(create_request("g@example.com"), None)
            .await
            .unwrap();

        service
            .update(
                created.id,
                UpdateGuideRequest {
                    password: Some("new-password".to_string()),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();

        let hash: String = sqlx::query_scalar("SELECT password_hash FROM guides WHERE id = ?")
            .bind(created.id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert!(bcrypt::verify("new-password", &hash).unwrap());
    }

    #[tokio::test]
    async fn delete_cascades_bookings_and_trips() {
        let (service, pool) = service().await;
        let province = seed_province(&pool, "Phuket").await;
        let guide = seed_guide(&pool).await;
        let tourist = seed_tourist(&pool).await;
        let trip = seed_trip(&pool, province, guide).await;
        seed_booking(&pool, trip, tourist, guide, province).await;

        service.delete(guide).await.unwrap();

        let bookings: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
            .fetch_one(&pool)
            .await
            .unwrap();
        let trips: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM trips")
            .fetch_one(&pool)
            .await
            .unwrap();
        let guides: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM guides WHERE id = ?")
            .bind(guide)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!((bookings, trips, guides), (0, 0, 0));
    }

    #[tokio::test]
    async fn delete_missing_guide_is_not_found() {
        let (service, _pool) = service().await;

        let err = service.delete(404).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(m) if m == "Guide not found"));
    }
}
