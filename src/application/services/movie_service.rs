//! Movie catalogue, detail view and predictions.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::Movie;
use crate::domain::repositories::{MovieRepository, RatingRepository, UserRepository};
use crate::domain::scoring::{DetailAggregator, MovieDetail, RatingSet};
use crate::error::AppError;

/// Service that loads rating records and runs the scoring engine over them.
///
/// Each call reads the latest persisted ratings; nothing is cached between
/// requests.
pub struct MovieService<
    M: MovieRepository + ?Sized,
    R: RatingRepository + ?Sized,
    U: UserRepository + ?Sized,
> {
    movies: Arc<M>,
    ratings: Arc<R>,
    users: Arc<U>,
    aggregator: DetailAggregator,
}

impl<M, R, U> MovieService<M, R, U>
where
    M: MovieRepository + ?Sized,
    R: RatingRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    pub fn new(
        movies: Arc<M>,
        ratings: Arc<R>,
        users: Arc<U>,
        aggregator: DetailAggregator,
    ) -> Self {
        Self {
            movies,
            ratings,
            users,
            aggregator,
        }
    }

    pub fn critic_id(&self) -> Option<i64> {
        self.aggregator.critic_id()
    }

    /// Returns a page of movies ordered by title, plus the total count.
    pub async fn list(&self, offset: i64, limit: i64) -> Result<(Vec<Movie>, i64), AppError> {
        let items = self.movies.list(offset, limit).await?;
        let total = self.movies.count().await?;
        Ok((items, total))
    }

    /// Retrieves a movie by ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the movie does not exist.
    pub async fn get(&self, movie_id: i64) -> Result<Movie, AppError> {
        self.movies
            .find_by_id(movie_id)
            .await?
            .ok_or_else(|| AppError::not_found("Movie not found", json!({ "movie_id": movie_id })))
    }

    async fn ensure_user(&self, user_id: i64) -> Result<(), AppError> {
        match self.users.find_by_id(user_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(
                "User not found",
                json!({ "user_id": user_id }),
            )),
        }
    }

    /// Loads every rating the engine needs to reason about `movie_id` for the
    /// given users: the raters of the movie plus the users themselves, each
    /// with their full profile.
    async fn load_ratings(
        &self,
        movie_id: i64,
        users: impl IntoIterator<Item = i64>,
    ) -> Result<RatingSet, AppError> {
        let mut user_ids: BTreeSet<i64> = self
            .ratings
            .list_for_movie(movie_id)
            .await?
            .into_iter()
            .map(|rating| rating.user_id)
            .collect();
        user_ids.extend(users);

        if user_ids.is_empty() {
            return Ok(RatingSet::new());
        }

        let user_ids: Vec<i64> = user_ids.into_iter().collect();
        let records = self.ratings.list_for_users(&user_ids).await?;

        Ok(records.into_iter().collect())
    }

    /// Composes the detail view of a movie for an optional viewer.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the movie or the viewer does not exist.
    pub async fn detail(
        &self,
        viewer: Option<i64>,
        movie_id: i64,
    ) -> Result<(Movie, MovieDetail), AppError> {
        let movie = self.get(movie_id).await?;
        if let Some(viewer_id) = viewer {
            self.ensure_user(viewer_id).await?;
        }
        let involved = viewer.into_iter().chain(self.aggregator.critic_id());
        let ratings = self.load_ratings(movie_id, involved).await?;

        let detail = self.aggregator.compose(viewer, movie_id, &ratings);

        tracing::debug!(
            movie_id,
            viewer,
            rating_count = detail.rating_count,
            deviation = detail.deviation,
            "Composed movie detail"
        );

        Ok((movie, detail))
    }

    /// Predicts `user_id`'s score for `movie_id`; `None` without enough data.
    pub async fn predict(&self, user_id: i64, movie_id: i64) -> Result<Option<i32>, AppError> {
        self.get(movie_id).await?;
        self.ensure_user(user_id).await?;
        let ratings = self.load_ratings(movie_id, [user_id]).await?;

        let prediction = self
            .aggregator
            .predictor()
            .predict(user_id, movie_id, &ratings);

        let outcome = if prediction.is_some() {
            "predicted"
        } else {
            "absent"
        };
        metrics::counter!("predictions_total", "outcome" => outcome).increment(1);

        Ok(prediction)
    }
}
