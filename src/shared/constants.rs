// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Admin role - platform operator, login-only identity
pub const ROLE_ADMIN: &str = "ADMIN";

/// Guide role - offers trips and owns the bookings made against them
pub const ROLE_GUIDE: &str = "GUIDE";

/// Tourist role - books trips
pub const ROLE_TOURIST: &str = "TOURIST";

/// Number of entries returned by the "top" listings (trips, guides)
pub const TOP_LIST_LIMIT: i64 = 6;
