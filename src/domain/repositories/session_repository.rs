//! Repository trait for login sessions.

use crate::domain::entities::Session;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for login sessions.
///
/// Sessions are looked up by the HMAC of their bearer token; raw tokens never
/// reach storage.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSessionRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::InMemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Creates a session for a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the token hash already exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, user_id: i64, token_hash: &str) -> Result<Session, AppError>;

    /// Finds an active (not revoked) session by token hash.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_active(&self, token_hash: &str) -> Result<Option<Session>, AppError>;

    /// Revokes the session with the given token hash.
    ///
    /// Returns `Ok(true)` if an active session was revoked, `Ok(false)` if none
    /// matched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn revoke(&self, token_hash: &str) -> Result<bool, AppError>;
}
