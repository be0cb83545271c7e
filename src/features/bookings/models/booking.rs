use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;

/// Booking status. Any of the four values can be set from any other, the
/// state machine is a guarded assignment rather than a workflow graph, so a
/// confirmed booking can go back to pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Rejected,
    Cancelled,
}

impl BookingStatus {
    /// Parse a wire value. Anything outside the four known statuses is
    /// rejected, the caller decides what error that maps to.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(BookingStatus::Pending),
            "confirmed" => Some(BookingStatus::Confirmed),
            "rejected" => Some(BookingStatus::Rejected),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingStatus::Pending => write!(f, "pending"),
            BookingStatus::Confirmed => write!(f, "confirmed"),
            BookingStatus::Rejected => write!(f, "rejected"),
            BookingStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Booking row. `guide_id` and `province_id` are copied from the trip when
/// the booking is created; reassigning the trip later does not touch them.
#[derive(Debug, Clone, FromRow)]
pub struct Booking {
    pub id: i64,
    pub trip_id: i64,
    pub tourist_id: i64,
    pub guide_id: i64,
    pub province_id: i64,
    pub datetime: DateTime<Utc>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_round_trip() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Rejected,
            BookingStatus::Cancelled,
        ] {
            assert_eq!(BookingStatus::parse(&status.to_string()), Some(status));
        }
        assert_eq!(BookingStatus::parse("archived"), None);
        assert_eq!(BookingStatus::parse("Confirmed"), None);
    }
}
