//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::{error::AppError, state::AppState};

/// Authenticated user, inserted into request extensions by [`layer`] and
/// [`optional_layer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub i64);

/// Raw bearer token of the current request, kept for logout.
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

async fn bearer_token(parts: &mut Parts) -> Option<String> {
    AuthBearer::from_request_parts(parts, &())
        .await
        .ok()
        .map(|AuthBearer(token)| token)
}

/// Requires a valid session token.
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Errors
///
/// Returns `401 Unauthorized` with `WWW-Authenticate: Bearer` if the header is
/// missing or malformed, or the session is unknown or revoked.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let token = bearer_token(&mut parts).await.ok_or_else(|| {
        AppError::unauthorized(
            "Unauthorized",
            json!({"reason": "Authorization header is missing or invalid"}),
        )
    })?;

    let user_id = st.auth_service.authenticate(&token).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(CurrentUser(user_id));
    req.extensions_mut().insert(SessionToken(token));

    Ok(next.run(req).await)
}

/// Resolves a bearer token when one is sent; anonymous requests pass through.
///
/// A token that is present but unknown or revoked is still rejected with 401.
pub async fn optional_layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();
    let token = bearer_token(&mut parts).await;
    let mut req = Request::from_parts(parts, body);

    if let Some(token) = token {
        let user_id = st.auth_service.authenticate(&token).await?;
        req.extensions_mut().insert(CurrentUser(user_id));
    }

    Ok(next.run(req).await)
}
