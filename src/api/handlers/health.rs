//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: storage reachable
/// - **503 Service Unavailable**: storage failing
///
/// A missing critic is reported as `warning` and does not degrade the
/// service; detail views simply carry no deviation.
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected, 1682 movies" },
///     "critic": { "status": "ok", "message": "Critic user id 944" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let database = check_database(&state).await;
    let critic = check_critic(&state);

    let healthy = database.is_ok() && critic.is_ok();

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { database, critic },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks storage by counting movies.
async fn check_database(state: &AppState) -> CheckStatus {
    match state.movie_service.list(0, 1).await {
        Ok((_, total)) => CheckStatus::new("ok", format!("Connected, {total} movies")),
        Err(e) => CheckStatus::new("error", format!("Database error: {e}")),
    }
}

fn check_critic(state: &AppState) -> CheckStatus {
    match state.movie_service.critic_id() {
        Some(id) => CheckStatus::new("ok", format!("Critic user id {id}")),
        None => CheckStatus::new("warning", "No critic configured"),
    }
}
