use sqlx::FromRow;

/// Tourist row. Unlike guides there is no role column, the table itself is
/// the role. No Serialize so the password hash stays internal.
#[derive(Debug, Clone, FromRow)]
pub struct Tourist {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub tel: Option<String>,
    pub picture: Option<String>,
}
