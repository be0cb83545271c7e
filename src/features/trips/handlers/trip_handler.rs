use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppPath, AppQuery};
use crate::features::trips::dtos::{
    CreateTripForm, CreateTripRequest, TopTripDto, TripListQuery, TripResponseDto, UpdateTripForm,
    UpdateTripRequest,
};
use crate::features::trips::services::TripService;
use crate::modules::storage::UploadedPicture;
use crate::shared::multipart::{picture_field, text_field};
use crate::shared::types::ApiResponse;

/// List all trips, optionally filtered by province
#[utoipa::path(
    get,
    path = "/trips",
    params(TripListQuery),
    responses(
        (status = 200, description = "List of trips", body = ApiResponse<Vec<TripResponseDto>>),
        (status = 400, description = "Invalid provinceId query value")
    ),
    tag = "trips"
)]
pub async fn list_trips(
    State(service): State<Arc<TripService>>,
    AppQuery(query): AppQuery<TripListQuery>,
) -> Result<Json<ApiResponse<Vec<TripResponseDto>>>> {
    let trips = service.list(query.province_id).await?;
    Ok(Json(ApiResponse::success(
        "Trips retrieved successfully",
        Some(trips),
    )))
}

/// Top trips by booking count
#[utoipa::path(
    get,
    path = "/trips/top",
    responses(
        (status = 200, description = "Most booked trips", body = ApiResponse<Vec<TopTripDto>>)
    ),
    tag = "trips"
)]
pub async fn top_trips(
    State(service): State<Arc<TripService>>,
) -> Result<Json<ApiResponse<Vec<TopTripDto>>>> {
    let trips = service.top().await?;
    Ok(Json(ApiResponse::success(
        "Top trips fetched successfully",
        Some(trips),
    )))
}

/// Search trips by trip name or province name
#[utoipa::path(
    get,
    path = "/trips/q/{keyword}",
    params(
        ("keyword" = String, Path, description = "Search keyword")
    ),
    responses(
        (status = 200, description = "Matching trips", body = ApiResponse<Vec<TripResponseDto>>)
    ),
    tag = "trips"
)]
pub async fn search_trips(
    State(service): State<Arc<TripService>>,
    AppPath(keyword): AppPath<String>,
) -> Result<Json<ApiResponse<Vec<TripResponseDto>>>> {
    let trips = service.search(&keyword).await?;
    Ok(Json(ApiResponse::success(
        "Search trips successfully",
        Some(trips),
    )))
}

/// Get a trip with its province and guide
#[utoipa::path(
    get,
    path = "/trips/{id}",
    params(
        ("id" = i64, Path, description = "Trip ID")
    ),
    responses(
        (status = 200, description = "Trip details", body = ApiResponse<TripResponseDto>),
        (status = 400, description = "Invalid trip id"),
        (status = 404, description = "Trip not found")
    ),
    tag = "trips"
)]
pub async fn get_trip(
    State(service): State<Arc<TripService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<TripResponseDto>>> {
    let trip = service.get(id).await?;
    Ok(Json(ApiResponse::success(
        "Trip retrieved successfully",
        Some(trip),
    )))
}

/// Create a trip
#[utoipa::path(
    post,
    path = "/trips",
    request_body(
        content = CreateTripForm,
        content_type = "multipart/form-data",
        description = "Trip fields with an optional picture file",
    ),
    responses(
        (status = 201, description = "Trip created successfully", body = ApiResponse<TripResponseDto>),
        (status = 400, description = "Missing name or unparseable ids"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Province or guide not found")
    ),
    tag = "trips",
    security(("bearer_auth" = []))
)]
pub async fn create_trip(
    State(service): State<Arc<TripService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<TripResponseDto>>)> {
    let mut name: Option<String> = None;
    let mut province_id: Option<String> = None;
    let mut guide_id: Option<String> = None;
    let mut price: Option<String> = None;
    let mut description: Option<String> = None;
    let mut picture: Option<UploadedPicture> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read multipart data: {}", e)))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "name" => name = Some(text_field(field, "name").await?),
            "provinceId" => province_id = Some(text_field(field, "provinceId").await?),
            "guideId" => guide_id = Some(text_field(field, "guideId").await?),
            "price" => price = Some(text_field(field, "price").await?),
            "description" => description = Some(text_field(field, "description").await?),
            "picture" => picture = Some(picture_field(field).await?),
            _ => {}
        }
    }

    // Both ids must be numeric; a missing id fails the same way
    let province_id = province_id.and_then(|s| s.parse::<i64>().ok());
    let guide_id = guide_id.and_then(|s| s.parse::<i64>().ok());
    let (Some(province_id), Some(guide_id)) = (province_id, guide_id) else {
        return Err(AppError::BadRequest(
            "Invalid provinceId or guideId".to_string(),
        ));
    };

    let price = match price.filter(|s| !s.is_empty()) {
        Some(text) => Some(
            text.parse::<f64>()
                .map_err(|_| AppError::BadRequest("Invalid price".to_string()))?,
        ),
        None => None,
    };

    let request = CreateTripRequest {
        name: name.ok_or_else(|| AppError::BadRequest("Name is required".to_string()))?,
        province_id,
        guide_id,
        price,
        description: description.filter(|s| !s.is_empty()),
    };

    let trip = service.create(request, picture).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Trip created successfully", Some(trip))),
    ))
}

/// Update a trip
#[utoipa::path(
    put,
    path = "/trips/{id}",
    params(
        ("id" = i64, Path, description = "Trip ID")
    ),
    request_body(
        content = UpdateTripForm,
        content_type = "multipart/form-data",
        description = "Any subset of trip fields with an optional new picture",
    ),
    responses(
        (status = 200, description = "Trip updated successfully", body = ApiResponse<TripResponseDto>),
        (status = 400, description = "Invalid trip id, price or reference ids"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Trip not found")
    ),
    tag = "trips",
    security(("bearer_auth" = []))
)]
pub async fn update_trip(
    State(service): State<Arc<TripService>>,
    AppPath(id): AppPath<i64>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<TripResponseDto>>> {
    let mut request = UpdateTripRequest::default();
    let mut picture: Option<UploadedPicture> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read multipart data: {}", e)))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "name" => request.name = Some(text_field(field, "name").await?),
            "provinceId" => {
                let text = text_field(field, "provinceId").await?;
                request.province_id = Some(text.parse::<i64>().map_err(|_| {
                    AppError::BadRequest("Invalid provinceId or guideId".to_string())
                })?);
            }
            "guideId" => {
                let text = text_field(field, "guideId").await?;
                request.guide_id = Some(text.parse::<i64>().map_err(|_| {
                    AppError::BadRequest("Invalid provinceId or guideId".to_string())
                })?);
            }
            "price" => {
                let text = text_field(field, "price").await?;
                request.price = Some(
                    text.parse::<f64>()
                        .map_err(|_| AppError::BadRequest("Invalid price".to_string()))?,
                );
            }
            "description" => request.description = Some(text_field(field, "description").await?),
            "isActive" => {
                let text = text_field(field, "isActive").await?;
                request.is_active = Some(text == "true");
            }
            "picture" => picture = Some(picture_field(field).await?),
            _ => {}
        }
    }

    let trip = service.update(id, request, picture).await?;
    Ok(Json(ApiResponse::success(
        "Trip updated successfully",
        Some(trip),
    )))
}

/// Delete a trip along with its bookings
#[utoipa::path(
    delete,
    path = "/trips/{id}",
    params(
        ("id" = i64, Path, description = "Trip ID")
    ),
    responses(
        (status = 200, description = "Trip deleted successfully"),
        (status = 400, description = "Invalid trip id"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Trip not found")
    ),
    tag = "trips",
    security(("bearer_auth" = []))
)]
pub async fn delete_trip(
    State(service): State<Arc<TripService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success("Trip deleted successfully", None)))
}
