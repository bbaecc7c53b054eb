//! User listing and profiles.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{Rating, User};
use crate::domain::repositories::{RatingRepository, UserRepository};
use crate::error::AppError;

/// Read-only access to users and their ratings.
pub struct UserService<U: UserRepository + ?Sized, R: RatingRepository + ?Sized> {
    users: Arc<U>,
    ratings: Arc<R>,
}

impl<U: UserRepository + ?Sized, R: RatingRepository + ?Sized> UserService<U, R> {
    pub fn new(users: Arc<U>, ratings: Arc<R>) -> Self {
        Self { users, ratings }
    }

    /// Returns a page of users ordered by ID, plus the total count.
    pub async fn list(&self, offset: i64, limit: i64) -> Result<(Vec<User>, i64), AppError> {
        let items = self.users.list(offset, limit).await?;
        let total = self.users.count().await?;
        Ok((items, total))
    }

    /// Retrieves a user and every rating they have made.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    pub async fn get_with_ratings(&self, user_id: i64) -> Result<(User, Vec<Rating>), AppError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "user_id": user_id })))?;

        let ratings = self.ratings.list_for_user(user_id).await?;
        Ok((user, ratings))
    }
}
