//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern. They
//! are the storage collaborator boundary: the scoring engine only ever sees
//! records fetched through them.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence` (PostgreSQL)
//!   and `crate::infrastructure::memory` (in-process)
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - User accounts
//! - [`MovieRepository`] - Movie catalogue
//! - [`RatingRepository`] - Ratings, the engine's input
//! - [`SessionRepository`] - Login sessions

pub mod movie_repository;
pub mod rating_repository;
pub mod session_repository;
pub mod user_repository;

pub use movie_repository::MovieRepository;
pub use rating_repository::RatingRepository;
pub use session_repository::SessionRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use movie_repository::MockMovieRepository;
#[cfg(test)]
pub use rating_repository::MockRatingRepository;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
