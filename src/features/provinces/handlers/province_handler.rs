use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath};
use crate::features::provinces::dtos::{
    CreateProvinceRequestDto, ProvinceResponseDto, UpdateProvinceRequestDto,
};
use crate::features::provinces::services::ProvinceService;
use crate::shared::types::ApiResponse;

/// List all provinces
#[utoipa::path(
    get,
    path = "/provinces",
    responses(
        (status = 200, description = "List of provinces", body = ApiResponse<Vec<ProvinceResponseDto>>)
    ),
    tag = "provinces"
)]
pub async fn list_provinces(
    State(service): State<Arc<ProvinceService>>,
) -> Result<Json<ApiResponse<Vec<ProvinceResponseDto>>>> {
    let provinces = service.list().await?;
    let dtos: Vec<ProvinceResponseDto> = provinces.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(
        "Provinces retrieved successfully",
        Some(dtos),
    )))
}

/// Get a province by id
#[utoipa::path(
    get,
    path = "/provinces/{id}",
    params(
        ("id" = i64, Path, description = "Province ID")
    ),
    responses(
        (status = 200, description = "Province details", body = ApiResponse<ProvinceResponseDto>),
        (status = 400, description = "Invalid province id"),
        (status = 404, description = "Province not found")
    ),
    tag = "provinces"
)]
pub async fn get_province(
    State(service): State<Arc<ProvinceService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<ProvinceResponseDto>>> {
    let province = service.get(id).await?;
    Ok(Json(ApiResponse::success(
        "Province retrieved successfully",
        Some(province.into()),
    )))
}

/// Create a province
#[utoipa::path(
    post,
    path = "/provinces",
    request_body = CreateProvinceRequestDto,
    responses(
        (status = 201, description = "Province created successfully", body = ApiResponse<ProvinceResponseDto>),
        (status = 400, description = "Validation error or province already exists"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "provinces",
    security(("bearer_auth" = []))
)]
pub async fn create_province(
    State(service): State<Arc<ProvinceService>>,
    AppJson(dto): AppJson<CreateProvinceRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<ProvinceResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let province = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Province created successfully",
            Some(province.into()),
        )),
    ))
}

/// Rename a province
#[utoipa::path(
    put,
    path = "/provinces/{id}",
    params(
        ("id" = i64, Path, description = "Province ID")
    ),
    request_body = UpdateProvinceRequestDto,
    responses(
        (status = 200, description = "Province updated successfully", body = ApiResponse<ProvinceResponseDto>),
        (status = 400, description = "Invalid province id"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Province not found")
    ),
    tag = "provinces",
    security(("bearer_auth" = []))
)]
pub async fn update_province(
    State(service): State<Arc<ProvinceService>>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<UpdateProvinceRequestDto>,
) -> Result<Json<ApiResponse<ProvinceResponseDto>>> {
    let province = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        "Province updated successfully",
        Some(province.into()),
    )))
}

/// Delete a province that no trip or booking references
#[utoipa::path(
    delete,
    path = "/provinces/{id}",
    params(
        ("id" = i64, Path, description = "Province ID")
    ),
    responses(
        (status = 200, description = "Province deleted successfully"),
        (status = 400, description = "Invalid province id"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Province not found"),
        (status = 500, description = "Province still referenced by trips or bookings")
    ),
    tag = "provinces",
    security(("bearer_auth" = []))
)]
pub async fn delete_province(
    State(service): State<Arc<ProvinceService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        "Province deleted successfully",
        None,
    )))
}
