//! DTOs for movie endpoints.

use chrono::NaiveDate;
use serde::Serialize;

use crate::api::dto::pagination::PaginationMeta;
use crate::domain::entities::Movie;
use crate::domain::scoring::MovieDetail;

#[derive(Debug, Serialize)]
pub struct MovieItem {
    pub id: i64,
    pub title: String,
    pub released_at: Option<NaiveDate>,
    pub imdb_url: Option<String>,
}

impl From<Movie> for MovieItem {
    fn from(movie: Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            released_at: movie.released_at,
            imdb_url: movie.imdb_url,
        }
    }
}

/// Paginated list of movies.
#[derive(Debug, Serialize)]
pub struct MovieListResponse {
    pub pagination: PaginationMeta,
    pub items: Vec<MovieItem>,
}

/// Movie detail view.
///
/// Every derived value is `null` when there is not enough data to compute it;
/// `average` is `null` rather than zero for a movie nobody rated.
#[derive(Debug, Serialize)]
pub struct MovieDetailResponse {
    pub movie: MovieItem,
    pub rating_count: usize,
    pub average: Option<f64>,
    pub viewer_effective: Option<i32>,
    pub prediction_used_for_viewer: bool,
    pub critic_effective: Option<i32>,
    pub deviation: Option<u32>,
    pub message: Option<&'static str>,
}

impl MovieDetailResponse {
    pub fn new(movie: Movie, detail: MovieDetail) -> Self {
        Self {
            movie: movie.into(),
            rating_count: detail.rating_count,
            average: detail.average,
            viewer_effective: detail.viewer_effective.map(|e| e.score()),
            prediction_used_for_viewer: detail.prediction_used_for_viewer,
            critic_effective: detail.critic_effective.map(|e| e.score()),
            deviation: detail.deviation,
            message: detail.message,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub movie_id: i64,
    pub predicted_score: Option<i32>,
}
