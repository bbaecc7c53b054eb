//! DTOs for rating submission.

use serde::{Deserialize, Serialize};

use crate::domain::entities::Rating;

/// Request body for `PUT /api/movies/{id}/rating`.
///
/// Range checking happens in the rating service against the rating scale.
#[derive(Debug, Deserialize)]
pub struct RateRequest {
    pub score: i32,
}

#[derive(Debug, Serialize)]
pub struct RatingItem {
    pub id: i64,
    pub user_id: i64,
    pub movie_id: i64,
    pub score: i32,
}

impl From<Rating> for RatingItem {
    fn from(rating: Rating) -> Self {
        Self {
            id: rating.id,
            user_id: rating.user_id,
            movie_id: rating.movie_id,
            score: rating.score,
        }
    }
}
