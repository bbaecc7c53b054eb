//! Repository trait for ratings.
//!
//! These are the reads the scoring engine consumes: ratings by movie, ratings
//! by user, and a batched by-users variant used to load neighbor profiles in
//! one round trip.

use crate::domain::entities::{Rating, RatingUpsert};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for ratings.
///
/// Implementations must keep at most one rating per `(user_id, movie_id)` and
/// make writes visible to subsequent reads.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgRatingRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::InMemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_rating.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Creates the rating, or overwrites the score of the existing one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors, including foreign key
    /// violations for unknown users or movies.
    async fn upsert(&self, user_id: i64, movie_id: i64, score: i32)
    -> Result<RatingUpsert, AppError>;

    /// Finds one user's rating for one movie.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find(&self, user_id: i64, movie_id: i64) -> Result<Option<Rating>, AppError>;

    /// Lists all ratings for a movie.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_for_movie(&self, movie_id: i64) -> Result<Vec<Rating>, AppError>;

    /// Lists all ratings made by a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Rating>, AppError>;

    /// Lists all ratings made by any of the given users.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_for_users(&self, user_ids: &[i64]) -> Result<Vec<Rating>, AppError>;
}
