use sqlx::FromRow;

/// Guide row. `role` stays GUIDE for rows created through the API, and only
/// rows carrying that role count as bookable guides. No Serialize here, the
/// password hash must not leave the service layer.
#[derive(Debug, Clone, FromRow)]
pub struct Guide {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub tel: Option<String>,
    pub role: String,
    pub status: bool,
    pub experience: Option<String>,
    pub language: Option<String>,
    pub picture: Option<String>,
}
