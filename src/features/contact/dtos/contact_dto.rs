use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Request body for the contact form. The validation message is the one the
/// Thai frontend has always shown for incomplete submissions.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SendContactRequestDto {
    #[validate(length(min = 1, message = "กรุณากรอกข้อมูลให้ครบ"))]
    pub name: String,
    #[validate(length(min = 1, message = "กรุณากรอกข้อมูลให้ครบ"))]
    pub email: String,
    pub subject: Option<String>,
    #[validate(length(min = 1, message = "กรุณากรอกข้อมูลให้ครบ"))]
    pub message: String,
}
