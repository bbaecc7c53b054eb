//! Business logic services for the application layer.

pub mod auth_service;
pub mod movie_service;
pub mod rating_service;
pub mod user_service;

pub use auth_service::{AuthService, IssuedSession, Registration};
pub use movie_service::MovieService;
pub use rating_service::RatingService;
pub use user_service::UserService;
