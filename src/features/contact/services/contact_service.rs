use std::sync::Arc;

use chrono::Utc;
use sqlx::SqlitePool;

use crate::core::error::{AppError, Result};
use crate::features::contact::dtos::SendContactRequestDto;
use crate::modules::mail::Mailer;

/// Service for contact-form submissions
pub struct ContactService {
    pool: SqlitePool,
    mailer: Arc<dyn Mailer>,
}

impl ContactService {
    pub fn new(pool: SqlitePool, mailer: Arc<dyn Mailer>) -> Self {
        Self { pool, mailer }
    }

    /// Store the message, then hand the notification email to a background
    /// task. The stored row is the source of truth; a failed delivery is
    /// only logged and never turns a stored submission into an error.
    pub async fn send(&self, request: SendContactRequestDto) -> Result<()> {
        sqlx::query(
            "INSERT INTO contacts (name, email, subject, message, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.subject)
        .bind(&request.message)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to store contact message: {:?}", e);
            AppError::Database(e)
        })?;

        let mailer = self.mailer.clone();
        tokio::spawn(async move {
            if let Err(e) = mailer
                .send_contact_notification(
                    &request.name,
                    &request.email,
                    request.subject.as_deref(),
                    &request.message,
                )
                .await
            {
                tracing::error!("Failed to send contact notification: {:?}", e);
            }
        });

        Ok(())
    }
}
