use sqlx::SqlitePool;

use crate::core::error::{AppError, Result};
use crate::features::dashboard::dtos::DashboardDto;

/// Service for the admin dashboard
pub struct DashboardService {
    pool: SqlitePool,
}

impl DashboardService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Count the rows behind the four dashboard tiles
    pub async fn counts(&self) -> Result<DashboardDto> {
        let total_trips = self.count("trips").await?;
        let total_guides = self.count("guides").await?;
        let total_tourists = self.count("tourists").await?;
        let total_bookings = self.count("bookings").await?;

        Ok(DashboardDto {
            total_trips,
            total_guides,
            total_tourists,
            total_bookings,
        })
    }

    async fn count(&self, table: &str) -> Result<i64> {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count {}: {:?}", table, e);
                AppError::Database(e)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{
        seed_booking, seed_guide, seed_province, seed_tourist, seed_trip, setup_test_pool,
    };

    #[tokio::test]
    async fn counts_reflect_seeded_rows() {
        let pool = setup_test_pool().await;
        let service = DashboardService::new(pool.clone());

        let empty = service.counts().await.unwrap();
        assert_eq!(empty.total_trips, 0);
        assert_eq!(empty.total_bookings, 0);

        let province = seed_province(&pool, "Phuket").await;
        let guide = seed_guide(&pool).await;
        let tourist = seed_tourist(&pool).await;
        let trip = seed_trip(&pool, province, guide).await;
        seed_trip(&pool, province, guide).await;
        seed_booking(&pool, trip, tourist, guide, province).await;

        let counts = service.counts().await.unwrap();
        assert_eq!(counts.total_trips, 2);
        assert_eq!(counts.total_guides, 1);
        assert_eq!(counts.total_tourists, 1);
        assert_eq!(counts.total_bookings, 1);
    }
}
