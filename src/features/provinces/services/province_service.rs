use sqlx::SqlitePool;

use crate::core::error::{AppError, Result};
use crate::features::provinces::dtos::{CreateProvinceRequestDto, UpdateProvinceRequestDto};
use crate::features::provinces::models::Province;

/// Service for province operations
pub struct ProvinceService {
    pool: SqlitePool,
}

impl ProvinceService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all provinces ordered by name
    pub async fn list(&self) -> Result<Vec<Province>> {
        sqlx::query_as::<_, Province>("SELECT id, name FROM provinces ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch provinces: {:?}", e);
                AppError::Database(e)
            })
    }

    /// Get a province by id
    pub async fn get(&self, id: i64) -> Result<Province> {
        sqlx::query_as::<_, Province>("SELECT id, name FROM provinces WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch province {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound("Province not found".to_string()))
    }

    /// Create a province with a unique name
    pub async fn create(&self, dto: CreateProvinceRequestDto) -> Result<Province> {
        let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM provinces WHERE name = ?")
            .bind(&dto.name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to check province name: {:?}", e);
                AppError::Database(e)
            })?;

        if existing.is_some() {
            return Err(AppError::Conflict("Province already exists".to_string()));
        }

        sqlx::query_as::<_, Province>("INSERT INTO provinces (name) VALUES (?) RETURNING id, name")
            .bind(&dto.name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create province: {:?}", e);
                AppError::Database(e)
            })
    }

    /// Rename a province
    pub async fn update(&self, id: i64, dto: UpdateProvinceRequestDto) -> Result<Province> {
        sqlx::query_as::<_, Province>(
            "UPDATE provinces SET name = COALESCE(?, name) WHERE id = ? RETURNING id, name",
        )
        .bind(&dto.name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update province {}: {:?}", id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("Province not found".to_string()))
    }

    /// Delete a province. Unlike guides, tourists and trips there is no
    /// cascade here: a province still referenced by trips or bookings makes
    /// the statement fail on the foreign keys, which surfaces as a 500 and
    /// leaves every row in place.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM provinces WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete province {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Province not found".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{seed_guide, seed_province, seed_trip, setup_test_pool};

    #[tokio::test]
    async fn list_orders_by_name() {
        let pool = setup_test_pool().await;
        seed_province(&pool, "Phuket").await;
        seed_province(&pool, "Chiang Mai").await;
        let service = ProvinceService::new(pool);

        let provinces = service.list().await.unwrap();

        let names: Vec<&str> = provinces.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Chiang Mai", "Phuket"]);
    }

    #[tokio::test]
    async fn get_missing_returns_not_found() {
        let pool = setup_test_pool().await;
        let service = ProvinceService::new(pool);

        let err = service.get(999).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(m) if m == "Province not found"));
    }

    #[tokio::test]
    async fn create_rejects_duplicate_name() {
        let pool = setup_test_pool().await;
        let service = ProvinceService::new(pool);

        service
            .create(CreateProvinceRequestDto {
                name: "Krabi".to_string(),
            })
            .await
            .unwrap();
        let err = service
            .create(CreateProvinceRequestDto {
                name: "Krabi".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(m) if m == "Province already exists"));
    }

    #[tokio::test]
    async fn update_renames_and_reports_missing() {
        let pool = setup_test_pool().await;
        let id = seed_province(&pool, "Phuket").await;
        let service = ProvinceService::new(pool);

        let updated = service
            .update(
                id,
                UpdateProvinceRequestDto {
                    name: Some("Phang Nga".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Phang Nga");

        let err = service
            .update(
                id + 1,
                UpdateProvinceRequestDto {
                    name: Some("Nowhere".to_string()),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_removes_row_and_second_delete_is_not_found() {
        let pool = setup_test_pool().await;
        let id = seed_province(&pool, "Phuket").await;
        let service = ProvinceService::new(pool);

        service.delete(id).await.unwrap();
        let err = service.delete(id).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_referenced_province_fails_and_rows_remain() {
        let pool = setup_test_pool().await;
        let province_id = seed_province(&pool, "Phuket").await;
        let guide_id = seed_guide(&pool).await;
        let trip_id = seed_trip(&pool, province_id, guide_id).await;
        let service = ProvinceService::new(pool.clone());

        let err = service.delete(province_id).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));

        let province: Option<i64> = sqlx::query_scalar("SELECT id FROM provinces WHERE id = ?")
            .bind(province_id)
            .fetch_optional(&pool)
            .await
            .unwrap();
        assert_eq!(province, Some(province_id));

        let trip: Option<i64> = sqlx::query_scalar("SELECT id FROM trips WHERE id = ?")
            .bind(trip_id)
            .fetch_optional(&pool)
            .await
            .unwrap();
        assert_eq!(trip, Some(trip_id));
    }
}
