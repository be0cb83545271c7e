use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request DTO for registering a tourist or guide account
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequestDto {
    #[validate(length(min = 1, message = "All fields are required"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "All fields are required"))]
    pub password: String,

    /// Either TOURIST or GUIDE; ADMIN accounts are provisioned out of band
    #[validate(length(min = 1, message = "All fields are required"))]
    pub role: String,

    /// Mandatory for guides, optional for tourists
    pub tel: Option<String>,

    /// Guide only
    pub language: Option<String>,

    /// Guide only
    pub experience: Option<String>,
}

/// Request DTO for logging in
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(length(min = 1, message = "All fields are required"))]
    pub email: String,

    #[validate(length(min = 1, message = "All fields are required"))]
    pub password: String,
}

/// Account summary returned alongside a freshly issued token
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthUserDto {
    /// Row id in the role's own table
    pub id: i64,

    pub name: String,

    pub email: String,

    /// ADMIN, GUIDE or TOURIST
    pub role: String,
}

/// Response DTO for register and login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponseDto {
    /// JWT bearer token
    pub token: String,

    pub user: AuthUserDto,
}
