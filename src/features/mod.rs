pub mod auth;
pub mod bookings;
pub mod contact;
pub mod dashboard;
pub mod guides;
pub mod provinces;
pub mod tourists;
pub mod trips;
