use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::tourists::models::Tourist;

/// Response DTO for tourist data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TouristResponseDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub tel: Option<String>,
    pub picture: Option<String>,
}

impl From<Tourist> for TouristResponseDto {
    fn from(tourist: Tourist) -> Self {
        Self {
            id: tourist.id,
            name: tourist.name,
            email: tourist.email,
            tel: tourist.tel,
            picture: tourist.picture,
        }
    }
}

/// Fields accepted when creating a tourist, parsed out of the multipart form
#[derive(Debug)]
pub struct CreateTouristRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub tel: Option<String>,
}

/// Fields accepted when updating a tourist. Passwords are not updatable
/// through this endpoint.
#[derive(Debug, Default)]
pub struct UpdateTouristRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub tel: Option<String>,
}

/// Multipart form for creating a tourist. Documentation only; the handler
/// reads the fields through axum's Multipart extractor.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct CreateTouristForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub tel: Option<String>,
    /// Picture file
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub picture: Option<String>,
}

/// Multipart form for updating a tourist. Documentation only.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UpdateTouristForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub tel: Option<String>,
    /// Picture file
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub picture: Option<String>,
}
