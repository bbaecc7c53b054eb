//! PostgreSQL implementation of the rating repository.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Rating, RatingUpsert};
use crate::domain::repositories::RatingRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct RatingRow {
    id: i64,
    user_id: i64,
    movie_id: i64,
    score: i32,
}

impl From<RatingRow> for Rating {
    fn from(row: RatingRow) -> Self {
        Rating::new(row.id, row.user_id, row.movie_id, row.score)
    }
}

#[derive(FromRow)]
struct UpsertRow {
    #[sqlx(flatten)]
    rating: RatingRow,
    inserted: bool,
}

/// PostgreSQL repository for ratings.
///
/// The `(user_id, movie_id)` unique constraint backs the one-rating-per-pair
/// rule; submissions use `ON CONFLICT` so concurrent writes for the same pair
/// converge on a single row.
pub struct PgRatingRepository {
    pool: Arc<PgPool>,
}

impl PgRatingRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RatingRepository for PgRatingRepository {
    async fn upsert(
        &self,
        user_id: i64,
        movie_id: i64,
        score: i32,
    ) -> Result<RatingUpsert, AppError> {
        // xmax is zero only for a freshly inserted tuple.
        let row = sqlx::query_as::<_, UpsertRow>(
            r#"
            INSERT INTO ratings (user_id, movie_id, score)
            VALUES ($1, $2, $3)
            ON CONFLICT ON CONSTRAINT ratings_user_movie_key
            DO UPDATE SET score = EXCLUDED.score
            RETURNING id, user_id, movie_id, score, (xmax = 0) AS inserted
            "#,
        )
        .bind(user_id)
        .bind(movie_id)
        .bind(score)
        .fetch_one(self.pool.as_ref())
        .await?;

        let rating = Rating::from(row.rating);
        Ok(if row.inserted {
            RatingUpsert::Created(rating)
        } else {
            RatingUpsert::Updated(rating)
        })
    }

    async fn find(&self, user_id: i64, movie_id: i64) -> Result<Option<Rating>, AppError> {
        let row = sqlx::query_as::<_, RatingRow>(
            r#"
            SELECT id, user_id, movie_id, score
            FROM ratings
            WHERE user_id = $1 AND movie_id = $2
            "#,
        )
        .bind(user_id)
        .bind(movie_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list_for_movie(&self, movie_id: i64) -> Result<Vec<Rating>, AppError> {
        let rows = sqlx::query_as::<_, RatingRow>(
            r#"
            SELECT id, user_id, movie_id, score
            FROM ratings
            WHERE movie_id = $1
            ORDER BY user_id
            "#,
        )
        .bind(movie_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Rating>, AppError> {
        let rows = sqlx::query_as::<_, RatingRow>(
            r#"
            SELECT id, user_id, movie_id, score
            FROM ratings
            WHERE user_id = $1
            ORDER BY movie_id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_for_users(&self, user_ids: &[i64]) -> Result<Vec<Rating>, AppError> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, RatingRow>(
            r#"
            SELECT id, user_id, movie_id, score
            FROM ratings
            WHERE user_id = ANY($1)
            ORDER BY user_id, movie_id
            "#,
        )
        .bind(user_ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
