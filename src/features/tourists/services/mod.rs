mod tourist_service;

pub use tourist_service::TouristService;
