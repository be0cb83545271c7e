mod tourist_dto;

pub use tourist_dto::{
    CreateTouristForm, CreateTouristRequest, TouristResponseDto, UpdateTouristForm,
    UpdateTouristRequest,
};
