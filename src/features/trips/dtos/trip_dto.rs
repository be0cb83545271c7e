use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::provinces::dtos::ProvinceResponseDto;

/// Guide summary nested under a trip response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TripGuideDto {
    pub id: i64,
    pub name: String,
}

/// Response DTO for trip data with its province and guide
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripResponseDto {
    pub id: i64,
    pub name: String,
    pub province_id: i64,
    pub guide_id: i64,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub picture: Option<String>,
    pub is_active: bool,
    pub province: ProvinceResponseDto,
    pub guide: TripGuideDto,
}

/// Trip plus booking count, for the top-trips list
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopTripDto {
    #[serde(flatten)]
    pub trip: TripResponseDto,
    pub bookings_count: i64,
}

/// Query parameters accepted by the trip list endpoint
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct TripListQuery {
    pub province_id: Option<i64>,
}

/// Fields accepted when creating a trip. Parsed out of the multipart form
/// by the handler; the picture travels separately.
#[derive(Debug)]
pub struct CreateTripRequest {
    pub name: String,
    pub province_id: i64,
    pub guide_id: i64,
    pub price: Option<f64>,
    pub description: Option<String>,
}

/// Fields accepted when updating a trip. All optional; absent fields leave
/// the row untouched. Changed references are not re-checked here, a bad id
/// fails on the foreign keys instead.
#[derive(Debug, Default)]
pub struct UpdateTripRequest {
    pub name: Option<String>,
    pub province_id: Option<i64>,
    pub guide_id: Option<i64>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// Multipart form for creating a trip. Documentation only; the handler
/// reads the fields through axum's Multipart extractor.
#[derive(Debug, ToSchema)]
#[schema(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct CreateTripForm {
    pub name: String,
    pub province_id: String,
    pub guide_id: String,
    pub price: Option<String>,
    pub description: Option<String>,
    /// Picture file
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub picture: Option<String>,
}

/// Multipart form for updating a trip. Documentation only.
#[derive(Debug, ToSchema)]
#[schema(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct UpdateTripForm {
    pub name: Option<String>,
    pub province_id: Option<String>,
    pub guide_id: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    /// "true" activates the trip, anything else deactivates it
    pub is_active: Option<String>,
    /// Picture file
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub picture: Option<String>,
}
