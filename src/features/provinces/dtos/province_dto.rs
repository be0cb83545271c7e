use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::provinces::models::Province;

/// Response DTO for province data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProvinceResponseDto {
    pub id: i64,
    pub name: String,
}

impl From<Province> for ProvinceResponseDto {
    fn from(province: Province) -> Self {
        Self {
            id: province.id,
            name: province.name,
        }
    }
}

/// Request DTO for creating a province
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProvinceRequestDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
}

/// Request DTO for renaming a province. A missing name leaves the row as is.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProvinceRequestDto {
    pub name: Option<String>,
}
