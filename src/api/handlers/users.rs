//! Handlers for user endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;

use crate::api::dto::pagination::{PaginationMeta, PaginationParams};
use crate::api::dto::ratings::RatingItem;
use crate::api::dto::users::{UserDetailResponse, UserItem, UserListResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Lists users ordered by ID.
///
/// # Endpoint
///
/// `GET /api/users?page=1&page_size=25`
pub async fn user_list_handler(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<UserListResponse>, AppError> {
    let (offset, limit) = params
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let (users, total) = state.user_service.list(offset, limit).await?;

    Ok(Json(UserListResponse {
        pagination: PaginationMeta::new(&params, total),
        items: users.into_iter().map(UserItem::from).collect(),
    }))
}

/// A user profile with every rating the user made.
///
/// # Endpoint
///
/// `GET /api/users/{id}`
///
/// # Errors
///
/// Returns 404 if the user does not exist.
pub async fn user_detail_handler(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserDetailResponse>, AppError> {
    let (user, ratings) = state.user_service.get_with_ratings(user_id).await?;

    Ok(Json(UserDetailResponse {
        user: user.into(),
        ratings: ratings.into_iter().map(RatingItem::from).collect(),
    }))
}
