use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppPath;
use crate::features::guides::dtos::{
    CreateGuideForm, CreateGuideRequest, GuideDetailDto, GuideResponseDto, TopGuideDto,
    UpdateGuideForm, UpdateGuideRequest,
};
use crate::features::guides::services::GuideService;
use crate::modules::storage::UploadedPicture;
use crate::shared::multipart::{picture_field, text_field};
use crate::shared::types::ApiResponse;

/// List all guides
#[utoipa::path(
    get,
    path = "/guides",
    responses(
        (status = 200, description = "List of guides", body = ApiResponse<Vec<GuideResponseDto>>)
    ),
    tag = "guides"
)]
pub async fn list_guides(
    State(service): State<Arc<GuideService>>,
) -> Result<Json<ApiResponse<Vec<GuideResponseDto>>>> {
    let guides = service.list().await?;
    let dtos: Vec<GuideResponseDto> = guides.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(
        "Guides retrieved successfully",
        Some(dtos),
    )))
}

/// Top guides by booking count
#[utoipa::path(
    get,
    path = "/guides/top",
    responses(
        (status = 200, description = "Most booked guides", body = ApiResponse<Vec<TopGuideDto>>)
    ),
    tag = "guides"
)]
pub async fn top_guides(
    State(service): State<Arc<GuideService>>,
) -> Result<Json<ApiResponse<Vec<TopGuideDto>>>> {
    let guides = service.top().await?;
    Ok(Json(ApiResponse::success(
        "Top guides fetched successfully",
        Some(guides),
    )))
}

/// Search guides by name or language
#[utoipa::path(
    get,
    path = "/guides/q/{keyword}",
    params(
        ("keyword" = String, Path, description = "Search keyword")
    ),
    responses(
        (status = 200, description = "Matching guides", body = ApiResponse<Vec<GuideResponseDto>>)
    ),
    tag = "guides"
)]
pub async fn search_guides(
    State(service): State<Arc<GuideService>>,
    AppPath(keyword): AppPath<String>,
) -> Result<Json<ApiResponse<Vec<GuideResponseDto>>>> {
    let guides = service.search(&keyword).await?;
    let dtos: Vec<GuideResponseDto> = guides.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(
        "Search guides successfully",
        Some(dtos),
    )))
}

/// Get a guide with its active trips
#[utoipa::path(
    get,
    path = "/guides/{id}",
    params(
        ("id" = i64, Path, description = "Guide ID")
    ),
    responses(
        (status = 200, description = "Guide details", body = ApiResponse<GuideDetailDto>),
        (status = 400, description = "Invalid guide id"),
        (status = 404, description = "Guide not found")
    ),
    tag = "guides"
)]
pub async fn get_guide(
    State(service): State<Arc<GuideService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<GuideDetailDto>>> {
    let guide = service.get_detail(id).await?;
    Ok(Json(ApiResponse::success(
        "Guide retrieved successfully",
        Some(guide),
    )))
}

/// Create a guide account
#[utoipa::path(
    post,
    path = "/guides",
    request_body(
        content = CreateGuideForm,
        content_type = "multipart/form-data",
        description = "Guide fields with an optional picture file",
    ),
    responses(
        (status = 201, description = "Guide created successfully", body = ApiResponse<GuideResponseDto>),
        (status = 400, description = "Missing fields or email already exists")
    ),
    tag = "guides"
)]
pub async fn create_guide(
    State(service): State<Arc<GuideService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<GuideResponseDto>>)> {
    let mut name: Option<String> = None;
    let mut email: Option<String> = None;
    let mut password: Option<String> = None;
    let mut tel: Option<String> = None;
    let mut experience: Option<String> = None;
    let mut language: Option<String> = None;
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
            "experience" => experience = Some(text_field(field, "experience").await?),
            "language" => language = Some(text_field(field, "language").await?),
            "picture" => picture = Some(picture_field(field).await?),
            _ => {}
        }
    }

    let request = CreateGuideRequest {
        name: name.ok_or_else(|| AppError::BadRequest("Name is required".to_string()))?,
        email: email.ok_or_else(|| AppError::BadRequest("Email is required".to_string()))?,
        password: password
            .ok_or_else(|| AppError::BadRequest("Password is required".to_string()))?,
        tel,
        experience,
        language,
    };

    let guide = service.create(request, picture).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Guide created successfully",
            Some(guide),
        )),
    ))
}

/// Update a guide account. The role field is immutable.
#[utoipa::path(
    put,
    path = "/guides/{id}",
    params(
        ("id" = i64, Path, description = "Guide ID")
    ),
    request_body(
        content = UpdateGuideForm,
        content_type = "multipart/form-data",
        description = "Any subset of guide fields with an optional new picture",
    ),
    responses(
        (status = 200, description = "Guide updated successfully", body = ApiResponse<GuideResponseDto>),
        (status = 400, description = "Invalid guide id or role in the form"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Guide not found")
    ),
    tag = "guides",
    security(("bearer_auth" = []))
)]
pub async fn update_guide(
    State(service): State<Arc<GuideService>>,
    AppPath(id): AppPath<i64>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<GuideResponseDto>>> {
    let mut request = UpdateGuideRequest::default();
    let mut picture: Option<UploadedPicture> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read multipart data: {}", e)))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "role" => {
                return Err(AppError::BadRequest("Role cannot be updated".to_string()));
            }
            "name" => request.name = Some(text_field(field, "name").await?),
            "email" => request.email = Some(text_field(field, "email").await?),
            "password" => request.password = Some(text_field(field, "password").await?),
            "tel" => request.tel = Some(text_field(field, "tel").await?),
            "experience" => request.experience = Some(text_field(field, "experience").await?),
            "language" => request.language = Some(text_field(field, "language").await?),
            "status" => {
                let text = text_field(field, "status").await?;
                request.status = Some(text == "true");
            }
            "picture" => picture = Some(picture_field(field).await?),
            _ => {}
        }
    }

    let guide = service.update(id, request, picture).await?;
    Ok(Json(ApiResponse::success(
        "Guide updated successfully",
        Some(guide),
    )))
}

/// Delete a guide along with its trips and bookings
#[utoipa::path(
    delete,
    path = "/guides/{id}",
    params(
        ("id" = i64, Path, description = "Guide ID")
    ),
    responses(
        (status = 200, description = "Guide deleted successfully"),
        (status = 400, description = "Invalid guide id"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Guide not found")
    ),
    tag = "guides",
    security(("bearer_auth" = []))
)]
pub async fn delete_guide(
    State(service): State<Arc<GuideService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        "Guide deleted successfully",
        None,
    )))
}
