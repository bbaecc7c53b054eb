//! Handler for rating submission.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::dto::ratings::{RateRequest, RatingItem};
use crate::api::middleware::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Creates or overwrites the signed-in user's rating of a movie.
///
/// # Endpoint
///
/// `PUT /api/movies/{id}/rating`
///
/// # Response Codes
///
/// - **201 Created**: first rating of this movie by the user
/// - **200 OK**: existing rating overwritten
/// - **400 Bad Request**: score outside 1..=5
/// - **404 Not Found**: unknown movie
pub async fn rate_movie_handler(
    State(state): State<AppState>,
    Path(movie_id): Path<i64>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Json(payload): Json<RateRequest>,
) -> Result<(StatusCode, Json<RatingItem>), AppError> {
    let outcome = state
        .rating_service
        .rate(user_id, movie_id, payload.score)
        .await?;

    let status = if outcome.is_created() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(outcome.rating().into())))
}
