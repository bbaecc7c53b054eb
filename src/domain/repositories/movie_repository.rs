//! Repository trait for the movie catalogue.

use crate::domain::entities::{Movie, NewMovie};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for movies.
///
/// Movies are read-only from the service's point of view except for seeding
/// and administrative inserts.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMovieRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::InMemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// Inserts a movie.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_movie: NewMovie) -> Result<Movie, AppError>;

    /// Finds a movie by ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Movie))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Movie>, AppError>;

    /// Lists movies ordered by title.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Movie>, AppError>;

    /// Counts all movies.
    ///
    /// Also serves as the database reachability probe for health checks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
