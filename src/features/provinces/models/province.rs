use serde::Serialize;
use sqlx::FromRow;

/// Province row. Names are unique; trips and bookings reference rows here
/// by id.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Province {
    pub id: i64,
    pub name: String,
}
