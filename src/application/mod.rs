//! Application layer services implementing business logic.
//!
//! Services consume repository traits, fetch the records an operation needs
//! and hand them to the scoring engine. Handlers only talk to services.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Registration, login and sessions
//! - [`services::movie_service::MovieService`] - Catalogue, detail view, predictions
//! - [`services::rating_service::RatingService`] - Rating submission
//! - [`services::user_service::UserService`] - User listing and profiles

pub mod services;
