//! PostgreSQL repository implementations.
//!
//! Queries are built with `sqlx::query_as` and mapped through `FromRow` row
//! structs, so the crate compiles without a live database.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - User accounts
//! - [`PgMovieRepository`] - Movie catalogue
//! - [`PgRatingRepository`] - Ratings with upsert semantics
//! - [`PgSessionRepository`] - Login sessions

pub mod pg_movie_repository;
pub mod pg_rating_repository;
pub mod pg_session_repository;
pub mod pg_user_repository;

pub use pg_movie_repository::PgMovieRepository;
pub use pg_rating_repository::PgRatingRepository;
pub use pg_session_repository::PgSessionRepository;
pub use pg_user_repository::PgUserRepository;
