mod trip_dto;

pub use trip_dto::{
    CreateTripForm, CreateTripRequest, TopTripDto, TripGuideDto, TripListQuery, TripResponseDto,
    UpdateTripForm, UpdateTripRequest,
};
