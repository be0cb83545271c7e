use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::Actor;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: i64,
    role: String,
    iat: i64,
    exp: i64,
}

/// Issues and verifies the bearer tokens carried by clients.
///
/// Tokens are HS256-signed and carry only the subject id and role; the
/// actor they name is not re-checked against the database on every request.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl_secs: i64,
}

impl TokenService {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            token_ttl_secs: config.token_ttl_secs,
        }
    }

    pub fn issue(&self, actor: Actor) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: actor.id(),
            role: actor.role().to_string(),
            iat: now,
            exp: now + self.token_ttl_secs,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to sign token: {}", e);
            AppError::Internal(format!("Failed to sign token: {}", e))
        })
    }

    pub fn verify(&self, token: &str) -> Result<Actor> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;

        let claims = token_data.claims;

        Actor::from_role(&claims.role, claims.sub)
            .ok_or_else(|| AppError::Unauthorized("Invalid token: unknown role".to_string()))
    }
}
