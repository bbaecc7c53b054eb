//! Rating entity: one user's score for one movie.

/// A user's score for a movie.
///
/// Storage guarantees at most one rating per `(user_id, movie_id)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rating {
    pub id: i64,
    pub user_id: i64,
    pub movie_id: i64,
    pub score: i32,
}

impl Rating {
    /// Creates a new Rating instance.
    pub fn new(id: i64, user_id: i64, movie_id: i64, score: i32) -> Self {
        Self {
            id,
            user_id,
            movie_id,
            score,
        }
    }
}

/// Result of submitting a score.
///
/// A first submission creates the rating; resubmission overwrites the score in
/// place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingUpsert {
    Created(Rating),
    Updated(Rating),
}

impl RatingUpsert {
    /// Returns the stored rating regardless of outcome.
    pub fn rating(&self) -> Rating {
        match self {
            RatingUpsert::Created(rating) | RatingUpsert::Updated(rating) => *rating,
        }
    }

    /// Returns true if the rating did not exist before.
    pub fn is_created(&self) -> bool {
        matches!(self, RatingUpsert::Created(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_accessors() {
        let rating = Rating::new(1, 10, 20, 4);

        let created = RatingUpsert::Created(rating);
        assert!(created.is_created());
        assert_eq!(created.rating(), rating);

        let updated = RatingUpsert::Updated(rating);
        assert!(!updated.is_created());
        assert_eq!(updated.rating().score, 4);
    }
}
