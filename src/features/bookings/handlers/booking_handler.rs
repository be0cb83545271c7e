use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppPath};
use crate::features::auth::model::Actor;
use crate::features::bookings::dtos::{
    BookingDetailDto, CreateBookingRequestDto, UpdateBookingRequestDto,
};
use crate::features::bookings::services::BookingService;
use crate::shared::types::ApiResponse;

/// List all bookings
#[utoipa::path(
    get,
    path = "/bookings",
    responses(
        (status = 200, description = "List of bookings", body = ApiResponse<Vec<BookingDetailDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "bookings",
    security(("bearer_auth" = []))
)]
pub async fn list_bookings(
    State(service): State<Arc<BookingService>>,
) -> Result<Json<ApiResponse<Vec<BookingDetailDto>>>> {
    let bookings = service.list().await?;
    Ok(Json(ApiResponse::success(
        "Bookings retrieved successfully",
        Some(bookings),
    )))
}

/// List the caller's bookings. Guides see bookings assigned to them,
/// tourists see bookings they created, admins see everything.
#[utoipa::path(
    get,
    path = "/bookings/my-bookings",
    responses(
        (status = 200, description = "Bookings scoped to the caller", body = ApiResponse<Vec<BookingDetailDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "bookings",
    security(("bearer_auth" = []))
)]
pub async fn my_bookings(
    State(service): State<Arc<BookingService>>,
    actor: Actor,
) -> Result<Json<ApiResponse<Vec<BookingDetailDto>>>> {
    let bookings = service.list_for_actor(actor).await?;
    Ok(Json(ApiResponse::success(
        "Bookings retrieved successfully",
        Some(bookings),
    )))
}

/// Get one booking
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    params(
        ("id" = i64, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking details", body = ApiResponse<BookingDetailDto>),
        (status = 400, description = "Invalid booking id"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Booking not found")
    ),
    tag = "bookings",
    security(("bearer_auth" = []))
)]
pub async fn get_booking(
    State(service): State<Arc<BookingService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<BookingDetailDto>>> {
    let booking = service.get(id).await?;
    Ok(Json(ApiResponse::success(
        "Booking retrieved successfully",
        Some(booking),
    )))
}

/// Book a trip as the caller
#[utoipa::path(
    post,
    path = "/bookings",
    request_body = CreateBookingRequestDto,
    responses(
        (status = 201, description = "Booking created successfully", body = ApiResponse<BookingDetailDto>),
        (status = 400, description = "Invalid tripId or datetime"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Trip not found")
    ),
    tag = "bookings",
    security(("bearer_auth" = []))
)]
pub async fn create_booking(
    State(service): State<Arc<BookingService>>,
    actor: Actor,
    AppJson(dto): AppJson<CreateBookingRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<BookingDetailDto>>)> {
    let booking = service.create(actor, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Booking created successfully",
            Some(booking),
        )),
    ))
}

/// Update a booking's datetime and/or status
#[utoipa::path(
    put,
    path = "/bookings/{id}",
    params(
        ("id" = i64, Path, description = "Booking ID")
    ),
    request_body = UpdateBookingRequestDto,
    responses(
        (status = 200, description = "Booking updated successfully", body = ApiResponse<BookingDetailDto>),
        (status = 400, description = "Invalid booking id, datetime or status value"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Status change attempted by someone other than the booking's guide"),
        (status = 404, description = "Booking not found")
    ),
    tag = "bookings",
    security(("bearer_auth" = []))
)]
pub async fn update_booking(
    State(service): State<Arc<BookingService>>,
    actor: Actor,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<UpdateBookingRequestDto>,
) -> Result<Json<ApiResponse<BookingDetailDto>>> {
    let booking = service.update(actor, id, dto).await?;
    Ok(Json(ApiResponse::success(
        "Booking updated successfully",
        Some(booking),
    )))
}

/// Cancel a booking
#[utoipa::path(
    delete,
    path = "/bookings/{id}",
    params(
        ("id" = i64, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking cancelled successfully"),
        (status = 400, description = "Invalid booking id"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Booking not found")
    ),
    tag = "bookings",
    security(("bearer_auth" = []))
)]
pub async fn delete_booking(
    State(service): State<Arc<BookingService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        "Booking cancelled successfully",
        None,
    )))
}
