use serde::Serialize;
use sqlx::FromRow;

/// Trip row. `guide_id` and `province_id` are the references bookings copy
/// from at creation time; `is_active` hides the trip from guide detail pages
/// without blocking new bookings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Trip {
    pub id: i64,
    pub name: String,
    pub province_id: i64,
    pub guide_id: i64,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub picture: Option<String>,
    pub is_active: bool,
}
