//! Handlers for the movie catalogue, detail view and predictions.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde_json::json;

use crate::api::dto::movies::{
    MovieDetailResponse, MovieItem, MovieListResponse, PredictionResponse,
};
use crate::api::dto::pagination::{PaginationMeta, PaginationParams};
use crate::api::middleware::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Lists movies ordered by title.
///
/// # Endpoint
///
/// `GET /api/movies?page=1&page_size=25`
pub async fn movie_list_handler(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<MovieListResponse>, AppError> {
    let (offset, limit) = params
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let (movies, total) = state.movie_service.list(offset, limit).await?;

    Ok(Json(MovieListResponse {
        pagination: PaginationMeta::new(&params, total),
        items: movies.into_iter().map(MovieItem::from).collect(),
    }))
}

/// Movie detail with community average and, for a signed-in viewer, their
/// effective rating and deviation from the critic.
///
/// # Endpoint
///
/// `GET /api/movies/{id}` (bearer token optional)
///
/// # Response
///
/// ```json
/// {
///   "movie": { "id": 1, "title": "Toy Story", "released_at": "1995-01-01", "imdb_url": null },
///   "rating_count": 452,
///   "average": 3.878,
///   "viewer_effective": 4,
///   "prediction_used_for_viewer": true,
///   "critic_effective": 2,
///   "deviation": 2,
///   "message": "Words fail me, as your taste in movies has clearly failed you."
/// }
/// ```
///
/// # Errors
///
/// Returns 404 if the movie does not exist.
pub async fn movie_detail_handler(
    State(state): State<AppState>,
    Path(movie_id): Path<i64>,
    viewer: Option<Extension<CurrentUser>>,
) -> Result<Json<MovieDetailResponse>, AppError> {
    let viewer = viewer.map(|Extension(CurrentUser(user_id))| user_id);

    let (movie, detail) = state.movie_service.detail(viewer, movie_id).await?;

    Ok(Json(MovieDetailResponse::new(movie, detail)))
}

/// Predicted score of the signed-in user for a movie.
///
/// # Endpoint
///
/// `GET /api/movies/{id}/prediction`
///
/// `predicted_score` is `null` when no similar user rated the movie.
pub async fn prediction_handler(
    State(state): State<AppState>,
    Path(movie_id): Path<i64>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> Result<Json<PredictionResponse>, AppError> {
    let predicted_score = state.movie_service.predict(user_id, movie_id).await?;

    Ok(Json(PredictionResponse {
        movie_id,
        predicted_score,
    }))
}
