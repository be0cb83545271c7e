use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::dashboard::dtos::DashboardDto;
use crate::features::dashboard::services::DashboardService;
use crate::shared::types::ApiResponse;

/// Dashboard totals
#[utoipa::path(
    get,
    path = "/admin/dashboard",
    responses(
        (status = 200, description = "Row counts per entity", body = ApiResponse<DashboardDto>)
    ),
    tag = "admin"
)]
pub async fn get_dashboard(
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<ApiResponse<DashboardDto>>> {
    let counts = service.counts().await?;
    Ok(Json(ApiResponse::success(
        "Dashboard retrieved successfully",
        Some(counts),
    )))
}
