//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod health;
pub mod movies;
pub mod ratings;
pub mod users;

pub use auth::{login_handler, logout_handler, register_handler};
pub use health::health_handler;
pub use movies::{movie_detail_handler, movie_list_handler, prediction_handler};
pub use ratings::rate_movie_handler;
pub use users::{user_detail_handler, user_list_handler};
