use std::sync::Arc;

use sqlx::SqlitePool;

use crate::core::error::{AppError, Result};
use crate::features::auth::services::hash_password;
use crate::features::tourists::dtos::{CreateTouristRequest, UpdateTouristRequest};
use crate::features::tourists::models::Tourist;
use crate::modules::storage::{MediaStore, UploadedPicture};

const TOURIST_COLUMNS: &str = "id, name, email, password_hash, tel, picture";

/// Service for tourist operations
pub struct TouristService {
    pool: SqlitePool,
    media: Arc<MediaStore>,
}

impl TouristService {
    pub fn new(pool: SqlitePool, media: Arc<MediaStore>) -> Self {
        Self { pool, media }
    }

    /// List all tourists
    pub async fn list(&self) -> Result<Vec<Tourist>> {
        sqlx::query_as::<_, Tourist>(&format!(
            "SELECT {} FROM tourists ORDER BY id ASC",
            TOURIST_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch tourists: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Get a tourist by id
    pub async fn get(&self, id: i64) -> Result<Tourist> {
        sqlx::query_as::<_, Tourist>(&format!(
            "SELECT {} FROM tourists WHERE id = ?",
            TOURIST_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch tourist {}: {:?}", id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("Tourist not found".to_string()))
    }

    /// Create a tourist account with an optional picture
    pub async fn create(
        &self,
        request: CreateTouristRequest,
        picture: Option<UploadedPicture>,
    ) -> Result<Tourist> {
        let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM tourists WHERE email = ?")
            .bind(&request.email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to check tourist email: {:?}", e);
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

        sqlx::query_as::<_, Tourist>(&format!(
            r#"
            INSERT INTO tourists (name, email, password_hash, tel, picture)
            VALUES (?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            TOURIST_COLUMNS
        ))
        .bind(&request.name)
        .bind(&request.email)
        .bind(&password_hash)
        .bind(&request.tel)
        .bind(&picture_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create tourist: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Update a tourist. Absent fields keep their current value; a new
    /// picture replaces the stored file name.
    pub async fn update(
        &self,
        id: i64,
        request: UpdateTouristRequest,
        picture: Option<UploadedPicture>,
    ) -> Result<Tourist> {
        let existing = self.get(id).await?;

        let picture_name = match &picture {
            Some(p) => Some(self.media.save(&p.original_name, &p.data).await?),
            None => existing.picture,
        };

        sqlx::query_as::<_, Tourist>(&format!(
            r#"
            UPDATE tourists SET
                name = COALESCE(?, name),
                email = COALESCE(?, email),
                tel = COALESCE(?, tel),
                picture = ?
            WHERE id = ?
            RETURNING {}
            "#,
            TOURIST_COLUMNS
        ))
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.tel)
        .bind(&picture_name)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update tourist {}: {:?}", id, e);
            AppError::Database(e)
        })
    }

    /// Delete a tourist and their bookings inside one transaction
    pub async fn delete(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to open transaction: {:?}", e);
            AppError::Database(e)
        })?;

        sqlx::query("DELETE FROM bookings WHERE tourist_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete bookings for tourist {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        let result = sqlx::query("DELETE FROM tourists WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete tourist {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        // Dropping the transaction rolls the booking delete back
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Tourist not found".to_string()));
        }

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit tourist delete: {:?}", e);
            AppError::Database(e)
        })
    }
}
