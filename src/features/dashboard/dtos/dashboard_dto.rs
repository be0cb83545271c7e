use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Row counts shown on the admin dashboard
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDto {
    pub total_trips: i64,
    pub total_guides: i64,
    pub total_tourists: i64,
    pub total_bookings: i64,
}
