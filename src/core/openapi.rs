use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::bookings::{
    dtos as bookings_dtos, handlers as bookings_handlers, models as bookings_models,
};
use crate::features::contact::{dtos as contact_dtos, handlers as contact_handlers};
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::guides::{dtos as guides_dtos, handlers as guides_handlers};
use crate::features::provinces::{dtos as provinces_dtos, handlers as provinces_handlers};
use crate::features::tourists::{dtos as tourists_dtos, handlers as tourists_handlers};
use crate::features::trips::{dtos as trips_dtos, handlers as trips_handlers};
use crate::shared::types::ApiResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::register,
        auth::handlers::login,
        // Provinces
        provinces_handlers::list_provinces,
        provinces_handlers::get_province,
        provinces_handlers::create_province,
        provinces_handlers::update_province,
        provinces_handlers::delete_province,
        // Guides
        guides_handlers::list_guides,
        guides_handlers::top_guides,
        guides_handlers::search_guides,
        guides_handlers::get_guide,
        guides_handlers::create_guide,
        guides_handlers::update_guide,
        guides_handlers::delete_guide,
        // Tourists
        tourists_handlers::list_tourists,
        tourists_handlers::get_tourist,
        tourists_handlers::create_tourist,
        tourists_handlers::update_tourist,
        tourists_handlers::delete_tourist,
        // Trips
        trips_handlers::list_trips,
        trips_handlers::top_trips,
        trips_handlers::search_trips,
        trips_handlers::get_trip,
        trips_handlers::create_trip,
        trips_handlers::update_trip,
        trips_handlers::delete_trip,
        // Bookings (protected)
        bookings_handlers::list_bookings,
        bookings_handlers::my_bookings,
        bookings_handlers::get_booking,
        bookings_handlers::create_booking,
        bookings_handlers::update_booking,
        bookings_handlers::delete_booking,
        // Contact (protected)
        contact_handlers::send_contact,
        // Dashboard
        dashboard_handlers::get_dashboard,
    ),
    components(
        schemas(
            // Auth
            auth::dtos::RegisterRequestDto,
            auth::dtos::LoginRequestDto,
            auth::dtos::AuthUserDto,
            auth::dtos::AuthResponseDto,
            ApiResponse<auth::dtos::AuthResponseDto>,
            // Provinces
            provinces_dtos::ProvinceResponseDto,
            provinces_dtos::CreateProvinceRequestDto,
            provinces_dtos::UpdateProvinceRequestDto,
            ApiResponse<Vec<provinces_dtos::ProvinceResponseDto>>,
            ApiResponse<provinces_dtos::ProvinceResponseDto>,
            // Guides
            guides_dtos::GuideResponseDto,
            guides_dtos::TopGuideDto,
            guides_dtos::GuideTripDto,
            guides_dtos::GuideDetailDto,
            guides_dtos::CreateGuideForm,
            guides_dtos::UpdateGuideForm,
            ApiResponse<Vec<guides_dtos::GuideResponseDto>>,
            ApiResponse<Vec<guides_dtos::TopGuideDto>>,
            ApiResponse<guides_dtos::GuideDetailDto>,
            ApiResponse<guides_dtos::GuideResponseDto>,
            // Tourists
            tourists_dtos::TouristResponseDto,
            tourists_dtos::CreateTouristForm,
            tourists_dtos::UpdateTouristForm,
            ApiResponse<Vec<tourists_dtos::TouristResponseDto>>,
            ApiResponse<tourists_dtos::TouristResponseDto>,
            // Trips
            trips_dtos::TripResponseDto,
            trips_dtos::TripGuideDto,
            trips_dtos::TopTripDto,
            trips_dtos::CreateTripForm,
            trips_dtos::UpdateTripForm,
            ApiResponse<Vec<trips_dtos::TripResponseDto>>,
            ApiResponse<Vec<trips_dtos::TopTripDto>>,
            ApiResponse<trips_dtos::TripResponseDto>,
            // Bookings
            bookings_models::BookingStatus,
            bookings_dtos::BookingDetailDto,
            bookings_dtos::BookingTripDto,
            bookings_dtos::BookingTouristDto,
            bookings_dtos::BookingGuideDto,
            bookings_dtos::CreateBookingRequestDto,
            bookings_dtos::UpdateBookingRequestDto,
            ApiResponse<Vec<bookings_dtos::BookingDetailDto>>,
            ApiResponse<bookings_dtos::BookingDetailDto>,
            // Contact
            contact_dtos::SendContactRequestDto,
            // Dashboard
            dashboard_dtos::DashboardDto,
            ApiResponse<dashboard_dtos::DashboardDto>,
        )
    ),
    tags(
        (name = "auth", description = "Login and guide account registration"),
        (name = "provinces", description = "Province catalogue"),
        (name = "guides", description = "Guide profiles and rankings"),
        (name = "tourists", description = "Tourist profiles"),
        (name = "trips", description = "Trips offered by guides"),
        (name = "bookings", description = "Trip bookings (requires authentication)"),
        (name = "contact", description = "Contact form submissions"),
        (name = "admin", description = "Dashboard counters for the admin frontend"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "GoWithGuide API",
        version = "0.1.0",
        description = "API documentation for GoWithGuide",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
