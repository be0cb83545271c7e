use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppPath;
use crate::features::tourists::dtos::{
    CreateTouristForm, CreateTouristRequest, TouristResponseDto, UpdateTouristForm,
    UpdateTouristRequest,
};
use crate::features::tourists::services::TouristService;
use crate::modules::storage::UploadedPicture;
use crate::shared::multipart::{picture_field, text_field};
use crate::shared::types::ApiResponse;

/// List all tourists
#[utoipa::path(
    get,
    path = "/tourists",
    responses(
        (status = 200, description = "List of tourists", body = ApiResponse<Vec<TouristResponseDto>>)
    ),
    tag = "tourists"
)]
pub async fn list_tourists(
    State(service): State<Arc<TouristService>>,
) -> Result<Json<ApiResponse<Vec<TouristResponseDto>>>> {
    let tourists = service.list().await?;
    let dtos: Vec<TouristResponseDto> = tourists.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(
        "Tourists retrieved successfully",
        Some(dtos),
    )))
}

/// Get a tourist by id
#[utoipa::path(
    get,
    path = "/tourists/{id}",
    params(
        ("id" = i64, Path, description = "Tourist ID")
    ),
    responses(
        (status = 200, description = "Tourist details", body = ApiResponse<TouristResponseDto>),
        (status = 400, description = "Invalid tourist id"),
        (status = 404, description = "Tourist not found")
    ),
    tag = "tourists"
)]
pub async fn get_tourist(
    State(service): State<Arc<TouristService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<TouristResponseDto>>> {
    let tourist = service.get(id).await?;
    Ok(Json(ApiResponse::success(
        "Tourist retrieved successfully",
        Some(tourist.into()),
    )))
}

/// Create a tourist account
#[utoipa::path(
    post,
    path = "/tourists",
    request_body(
        content = CreateTouristForm,
        content_type = "multipart/form-data",
        description = "Tourist fields with an optional picture file",
    ),
    responses(
        (status = 201, description = "Tourist created successfully", body = ApiResponse<TouristResponseDto>),
        (status = 400, description = "Missing fields or email already exists")
    ),
    tag = "tourists"
)]
pub async fn create_tourist(
    State(service): State<Arc<TouristService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<TouristResponseDto>>)> {
    let mut name: Option<String> = None;
    let mut email: Option<String> = None;
    let mut password: Option<String> = None;
    let mut tel: Option<String> = None;
    let mut picture: Option<UploadedPicture> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read multipart data: {}", e)))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "name" => name = Some(text_field(field, "name").await?),
            "email" => email = Some(text_field(field, "email").await?),
            "password" => password = Some(text_field(field, "password").await?),
            "tel" => tel = Some(text_field(field, "tel").await?),
            "picture" => picture = Some(picture_field(field).await?),
            _ => {}
        }
    }

    let request = CreateTouristRequest {
        name: name.ok_or_else(|| AppError::BadRequest("Name is required".to_string()))?,
        email: email.ok_or_else(|| AppError::BadRequest("Email is required".to_string()))?,
        password: password
            .ok_or_else(|| AppError::BadRequest("Password is required".to_string()))?,
        tel,
    };

    let tourist = service.create(request, picture).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Tourist created successfully",
            Some(tourist.into()),
        )),
    ))
}

/// Update a tourist account
#[utoipa::path(
    put,
    path = "/tourists/{id}",
    params(
        ("id" = i64, Path, description = "Tourist ID")
    ),
    request_body(
        content = UpdateTouristForm,
        content_type = "multipart/form-data",
        description = "Any subset of tourist fields with an optional new picture",
    ),
    responses(
        (status = 200, description = "Tourist updated successfully", body = ApiResponse<TouristResponseDto>),
        (status = 400, description = "Invalid tourist id"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Tourist not found")
    ),
    tag = "tourists",
    security(("bearer_auth" = []))
)]
pub async fn update_tourist(
    State(service): State<Arc<TouristService>>,
    AppPath(id): AppPath<i64>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<TouristResponseDto>>> {
    let mut request = UpdateTouristRequest::default();
    let mut picture: Option<UploadedPicture> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read multipart data: {}", e)))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "name" => request.name = Some(text_field(field, "name").await?),
            "email" => request.email = Some(text_field(field, "email").await?),
            "tel" => request.tel = Some(text_field(field, "tel").await?),
            "picture" => picture = Some(picture_field(field).await?),
            _ => {}
        }
    }

    let tourist = service.update(id, request, picture).await?;
    Ok(Json(ApiResponse::success(
        "Tourist updated successfully",
        Some(tourist.into()),
    )))
}

/// Delete a tourist along with their bookings
#[utoipa::path(
    delete,
    path = "/tourists/{id}",
    params(
        ("id" = i64, Path, description = "Tourist ID")
    ),
    responses(
        (status = 200, description = "Tourist deleted successfully"),
        (status = 400, description = "Invalid tourist id"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Tourist not found")
    ),
    tag = "tourists",
    security(("bearer_auth" = []))
)]
pub async fn delete_tourist(
    State(service): State<Arc<TouristService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        "Tourist deleted successfully",
        None,
    )))
}
