//! PostgreSQL implementation of the movie repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Movie, NewMovie};
use crate::domain::repositories::MovieRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct MovieRow {
    id: i64,
    title: String,
    released_at: Option<NaiveDate>,
    imdb_url: Option<String>,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Movie::new(row.id, row.title, row.released_at, row.imdb_url)
    }
}

/// PostgreSQL repository for the movie catalogue.
pub struct PgMovieRepository {
    pool: Arc<PgPool>,
}

impl PgMovieRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovieRepository for PgMovieRepository {
    async fn create(&self, new_movie: NewMovie) -> Result<Movie, AppError> {
        let row = sqlx::query_as::<_, MovieRow>(
            r#"
            INSERT INTO movies (title, released_at, imdb_url)
            VALUES ($1, $2, $3)
            RETURNING id, title, released_at, imdb_url
            "#,
        )
        .bind(&new_movie.title)
        .bind(new_movie.released_at)
        .bind(&new_movie.imdb_url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Movie>, AppError> {
        let row = sqlx::query_as::<_, MovieRow>(
            r#"
            SELECT id, title, released_at, imdb_url
            FROM movies
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Movie>, AppError> {
        let rows = sqlx::query_as::<_, MovieRow>(
            r#"
            SELECT id, title, released_at, imdb_url
            FROM movies
            ORDER BY title, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movies")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
