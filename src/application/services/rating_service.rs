//! Rating submission.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::RatingUpsert;
use crate::domain::repositories::{MovieRepository, RatingRepository};
use crate::domain::scoring::RatingScale;
use crate::error::AppError;

/// Service for creating and overwriting a user's rating of a movie.
pub struct RatingService<M: MovieRepository + ?Sized, R: RatingRepository + ?Sized> {
    movies: Arc<M>,
    ratings: Arc<R>,
    scale: RatingScale,
}

impl<M: MovieRepository + ?Sized, R: RatingRepository + ?Sized> RatingService<M, R> {
    pub fn new(movies: Arc<M>, ratings: Arc<R>, scale: RatingScale) -> Self {
        Self {
            movies,
            ratings,
            scale,
        }
    }

    /// Stores `score` as `user_id`'s rating of `movie_id`.
    ///
    /// The first submission creates the rating, later ones overwrite it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the score is outside the scale and
    /// [`AppError::NotFound`] if the movie does not exist.
    pub async fn rate(
        &self,
        user_id: i64,
        movie_id: i64,
        score: i32,
    ) -> Result<RatingUpsert, AppError> {
        if !self.scale.contains(score) {
            return Err(AppError::bad_request(
                "Score out of range",
                json!({ "score": score, "min": self.scale.min(), "max": self.scale.max() }),
            ));
        }

        if self.movies.find_by_id(movie_id).await?.is_none() {
            return Err(AppError::not_found(
                "Movie not found",
                json!({ "movie_id": movie_id }),
            ));
        }

        let outcome = self.ratings.upsert(user_id, movie_id, score).await?;

        let label = if outcome.is_created() {
            "created"
        } else {
            "updated"
        };
        metrics::counter!("ratings_submitted_total", "outcome" => label).increment(1);
        tracing::info!(user_id, movie_id, score, outcome = label, "Rating stored");

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Movie, Rating};
    use crate::domain::repositories::{MockMovieRepository, MockRatingRepository};

    fn existing_movie() -> MockMovieRepository {
        let mut movies = MockMovieRepository::new();
        movies
            .expect_find_by_id()
            .returning(|id| Ok(Some(Movie::new(id, "Alien".to_string(), None, None))));
        movies
    }

    fn service(
        movies: MockMovieRepository,
        ratings: MockRatingRepository,
    ) -> RatingService<MockMovieRepository, MockRatingRepository> {
        RatingService::new(Arc::new(movies), Arc::new(ratings), RatingScale::FIVE_STAR)
    }

    #[tokio::test]
    async fn test_rate_creates() {
        let mut ratings = MockRatingRepository::new();
        ratings
            .expect_upsert()
            .withf(|user_id, movie_id, score| *user_id == 1 && *movie_id == 2 && *score == 5)
            .times(1)
            .returning(|u, m, s| Ok(RatingUpsert::Created(Rating::new(1, u, m, s))));

        let outcome = service(existing_movie(), ratings)
            .rate(1, 2, 5)
            .await
            .unwrap();

        assert!(outcome.is_created());
        assert_eq!(outcome.rating().score, 5);
    }

    #[tokio::test]
    async fn test_rate_updates() {
        let mut ratings = MockRatingRepository::new();
        ratings
            .expect_upsert()
            .returning(|u, m, s| Ok(RatingUpsert::Updated(Rating::new(1, u, m, s))));

        let outcome = service(existing_movie(), ratings)
            .rate(1, 2, 3)
            .await
            .unwrap();

        assert!(!outcome.is_created());
    }

    #[tokio::test]
    async fn test_rate_out_of_range_is_rejected_before_storage() {
        let mut movies = MockMovieRepository::new();
        movies.expect_find_by_id().times(0);
        let mut ratings = MockRatingRepository::new();
        ratings.expect_upsert().times(0);

        let service = service(movies, ratings);

        for score in [0, 6, -1] {
            let result = service.rate(1, 2, score).await;
            assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
        }
    }

    #[tokio::test]
    async fn test_rate_unknown_movie() {
        let mut movies = MockMovieRepository::new();
        movies.expect_find_by_id().returning(|_| Ok(None));
        let mut ratings = MockRatingRepository::new();
        ratings.expect_upsert().times(0);

        let result = service(movies, ratings).rate(1, 404, 4).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }
}
