use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::contact::dtos::SendContactRequestDto;
use crate::features::contact::services::ContactService;
use crate::shared::types::ApiResponse;

/// Submit a contact-form message
#[utoipa::path(
    post,
    path = "/contact",
    request_body = SendContactRequestDto,
    responses(
        (status = 200, description = "Message stored and notification queued"),
        (status = 400, description = "Missing name, email or message"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "contact",
    security(("bearer_auth" = []))
)]
pub async fn send_contact(
    State(service): State<Arc<ContactService>>,
    AppJson(dto): AppJson<SendContactRequestDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.send(dto).await?;
    Ok(Json(ApiResponse::success("ส่งข้อความสำเร็จแล้ว", None)))
}
