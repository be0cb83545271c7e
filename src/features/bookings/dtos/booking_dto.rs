use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::bookings::models::BookingStatus;
use crate::features::provinces::dtos::ProvinceResponseDto;

/// Trip row nested under a booking response. Carries the trip's current
/// province and guide ids, which can drift from the booking's own copies
/// after a reassignment.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingTripDto {
    pub id: i64,
    pub name: String,
    pub province_id: i64,
    pub guide_id: i64,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub picture: Option<String>,
    pub is_active: bool,
}

/// Tourist summary nested under a booking response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingTouristDto {
    pub id: i64,
    pub name: String,
    pub tel: Option<String>,
}

/// Guide summary nested under a booking response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingGuideDto {
    pub id: i64,
    pub name: String,
    pub experience: Option<String>,
    pub language: Option<String>,
    pub tel: Option<String>,
}

/// Response DTO for a booking with everything it references
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetailDto {
    pub id: i64,
    pub trip_id: i64,
    pub tourist_id: i64,
    pub guide_id: i64,
    pub province_id: i64,
    pub datetime: DateTime<Utc>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub trip: BookingTripDto,
    pub province: ProvinceResponseDto,
    pub tourist: BookingTouristDto,
    pub guide: BookingGuideDto,
}

/// Request body for creating a booking. The tourist id comes from the
/// caller's token, never from the body.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequestDto {
    pub trip_id: i64,
    /// RFC 3339 instant, e.g. "2025-01-01T10:00:00Z"
    pub datetime: String,
}

/// Request body for updating a booking. Status stays a plain string here so
/// the ownership check can run before the value is inspected.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateBookingRequestDto {
    /// RFC 3339 instant
    pub datetime: Option<String>,
    /// One of "pending", "confirmed", "rejected", "cancelled"
    pub status: Option<String>,
}
