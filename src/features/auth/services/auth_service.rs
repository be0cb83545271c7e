use std::sync::Arc;

use sqlx::SqlitePool;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{
    AuthResponseDto, AuthUserDto, LoginRequestDto, RegisterRequestDto,
};
use crate::features::auth::model::Actor;
use crate::features::auth::services::token_service::TokenService;
use crate::shared::constants::{ROLE_GUIDE, ROLE_TOURIST};
use crate::shared::validation::TEL_REGEX;

/// Work factor for bcrypt password hashing
const BCRYPT_COST: u32 = 10;

/// Credential columns shared by the admins, tourists and guides tables
#[derive(sqlx::FromRow)]
struct AccountRow {
    id: i64,
    name: String,
    email: String,
    password_hash: String,
}

/// Service for authentication operations (register, login)
pub struct AuthService {
    pool: SqlitePool,
    token_service: Arc<TokenService>,
}

impl AuthService {
    pub fn new(pool: SqlitePool, token_service: Arc<TokenService>) -> Self {
        Self {
            pool,
            token_service,
        }
    }

    /// Register a new tourist or guide account
    pub async fn register(&self, dto: RegisterRequestDto) -> Result<AuthResponseDto> {
        if dto.role != ROLE_TOURIST && dto.role != ROLE_GUIDE {
            return Err(AppError::BadRequest("Invalid role".to_string()));
        }

        if dto.role == ROLE_GUIDE {
            let tel = dto.tel.as_deref().unwrap_or_default();
            if tel.is_empty() {
                return Err(AppError::BadRequest(
                    "Tel is required for guide".to_string(),
                ));
            }
            if !TEL_REGEX.is_match(tel) {
                return Err(AppError::BadRequest(
                    "Tel must be 10 digits and start with 0".to_string(),
                ));
            }
        }

        let existing: Option<i64> = if dto.role == ROLE_TOURIST {
            sqlx::query_scalar("SELECT id FROM tourists WHERE email = ?")
                .bind(&dto.email)
                .fetch_optional(&self.pool)
                .await
        } else {
            sqlx::query_scalar("SELECT id FROM guides WHERE email = ?")
                .bind(&dto.email)
                .fetch_optional(&self.pool)
                .await
        }
        .map_err(|e| {
            tracing::error!("Failed to check email uniqueness: {:?}", e);
            AppError::Database(e)
        })?;

        if existing.is_some() {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }

        let password_hash = hash_password(dto.password.clone()).await?;

        let (id, actor) = if dto.role == ROLE_TOURIST {
            let id: i64 = sqlx::query_scalar(
                r#"
                INSERT INTO tourists (name, email, password_hash, tel)
                VALUES (?, ?, ?, ?)
                RETURNING id
                "#,
            )
            .bind(&dto.name)
            .bind(&dto.email)
            .bind(&password_hash)
            .bind(&dto.tel)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create tourist: {:?}", e);
                AppError::Database(e)
            })?;
            (id, Actor::Tourist(id))
        } else {
            let id: i64 = sqlx::query_scalar(
                r#"
                INSERT INTO guides (name, email, password_hash, tel, language, experience)
                VALUES (?, ?, ?, ?, ?, ?)
                RETURNING id
                "#,
            )
            .bind(&dto.name)
            .bind(&dto.email)
            .bind(&password_hash)
            .bind(&dto.tel)
            .bind(&dto.language)
            .bind(&dto.experience)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create guide: {:?}", e);
                AppError::Database(e)
            })?;
            (id, Actor::Guide(id))
        };

        let token = self.token_service.issue(actor)?;

        Ok(AuthResponseDto {
            token,
            user: AuthUserDto {
                id,
                name: dto.name,
                email: dto.email,
                role: dto.role,
            },
        })
    }

    /// Login with email and password
    pub async fn login(&self, dto: LoginRequestDto) -> Result<AuthResponseDto> {
        let (row, actor) = self
            .find_account_by_email(&dto.email)
            .await?
            .ok_or_else(|| AppError::BadRequest("User not found".to_string()))?;

        let valid = verify_password(dto.password, row.password_hash.clone()).await?;
        if !valid {
            return Err(AppError::BadRequest("Invalid password".to_string()));
        }

        let token = self.token_service.issue(actor)?;

        Ok(AuthResponseDto {
            token,
            user: AuthUserDto {
                id: row.id,
                name: row.name,
                email: row.email,
                role: actor.role().to_string(),
            },
        })
    }

    /// Probe the admins, tourists and guides tables in order for an account
    /// with the given email. First hit wins.
    async fn find_account_by_email(&self, email: &str) -> Result<Option<(AccountRow, Actor)>> {
        let admin = sqlx::query_as::<_, AccountRow>(
            "SELECT id, name, email, password_hash FROM admins WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up admin by email: {:?}", e);
            AppError::Database(e)
        })?;
        if let Some(row) = admin {
            let actor = Actor::Admin(row.id);
            return Ok(Some((row, actor)));
        }

        let tourist = sqlx::query_as::<_, AccountRow>(
            "SELECT id, name, email, password_hash FROM tourists WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up tourist by email: {:?}", e);
            AppError::Database(e)
        })?;
        if let Some(row) = tourist {
            let actor = Actor::Tourist(row.id);
            return Ok(Some((row, actor)));
        }

        let guide = sqlx::query_as::<_, AccountRow>(
            "SELECT id, name, email, password_hash FROM guides WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up guide by email: {:?}", e);
            AppError::Database(e)
        })?;
        if let Some(row) = guide {
            let actor = Actor::Guide(row.id);
            return Ok(Some((row, actor)));
        }

        Ok(None)
    }
}

/// Hash a password on the blocking thread pool
pub async fn hash_password(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .map_err(|e| {
            tracing::error!("Password hashing task failed: {:?}", e);
            AppError::Internal("Internal server error".to_string())
        })?
        .map_err(|e| {
            tracing::error!("Failed to hash password: {:?}", e);
            AppError::Internal("Internal server error".to_string())
        })
}

/// Verify a password against a stored hash on the blocking thread pool
pub async fn verify_password(password: String, password_hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &password_hash))
        .await
        .map_err(|e| {
            tracing::error!("Password verification task failed: {:?}", e);
            AppError::Internal("Internal server error".to_string())
        })?
        .map_err(|e| {
            tracing::error!("Failed to verify password: {:?}", e);
            AppError::Internal("Internal server error".to_string())
        })
}
