use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::guides::models::Guide;
use crate::features::provinces::dtos::ProvinceResponseDto;

/// Response DTO for guide data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GuideResponseDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub tel: Option<String>,
    pub role: String,
    pub status: bool,
    pub experience: Option<String>,
    pub language: Option<String>,
    pub picture: Option<String>,
}

impl From<Guide> for GuideResponseDto {
    fn from(guide: Guide) -> Self {
        Self {
            id: guide.id,
            name: guide.name,
            email: guide.email,
            tel: guide.tel,
            role: guide.role,
            status: guide.status,
            experience: guide.experience,
            language: guide.language,
            picture: guide.picture,
        }
    }
}

/// Guide plus booking count, for the top-guides list
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopGuideDto {
    #[serde(flatten)]
    pub guide: GuideResponseDto,
    pub bookings_count: i64,
}

/// Trip summary nested under a guide detail response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuideTripDto {
    pub id: i64,
    pub name: String,
    pub province_id: i64,
    pub guide_id: i64,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub picture: Option<String>,
    pub is_active: bool,
    pub province: ProvinceResponseDto,
}

/// Response DTO for a single guide with its active trips
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GuideDetailDto {
    #[serde(flatten)]
    pub guide: GuideResponseDto,
    pub trips: Vec<GuideTripDto>,
}

/// Fields accepted when creating a guide. Parsed out of the multipart form
/// by the handler; the picture travels separately.
#[derive(Debug)]
pub struct CreateGuideRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub tel: Option<String>,
    pub experience: Option<String>,
    pub language: Option<String>,
}

/// Fields accepted when updating a guide. All optional; absent fields leave
/// the row untouched.
#[derive(Debug, Default)]
pub struct UpdateGuideRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub tel: Option<String>,
    pub experience: Option<String>,
    pub language: Option<String>,
    pub status: Option<bool>,
}

/// Multipart form for creating a guide. Documentation only; the handler
/// reads the fields through axum's Multipart extractor.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct CreateGuideForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub tel: Option<String>,
    pub experience: Option<String>,
    pub language: Option<String>,
    /// Picture file
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub picture: Option<String>,
}

/// Multipart form for updating a guide. Documentation only.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UpdateGuideForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub tel: Option<String>,
    pub experience: Option<String>,
    pub language: Option<String>,
    /// "true" enables the guide, anything else disables it
    pub status: Option<String>,
    /// Picture file
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub picture: Option<String>,
}
