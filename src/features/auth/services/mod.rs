mod auth_service;
pub mod token_service;

pub use auth_service::{hash_password, verify_password, AuthService};
pub use token_service::TokenService;
