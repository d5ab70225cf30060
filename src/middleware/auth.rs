use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use jwt_simple::prelude::*;

use crate::state::AppState;

/// The authenticated caller, injected as a request extension by
/// [`customer_auth`]. The auth provider's `sub` claim is the customer
/// identifier.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub sub: String,
}

/// Extract a Bearer token from the Authorization header.
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}

/// Require a valid auth-provider access token (HS256) on the request.
pub async fn customer_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = extract_bearer_token(request.headers()).ok_or(StatusCode::UNAUTHORIZED)?;

    let key = HS256Key::from_bytes(state.config.auth_token_secret.as_bytes());
    let claims = key
        .verify_token::<NoCustomClaims>(token, None)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let sub = claims.subject.ok_or(StatusCode::UNAUTHORIZED)?;

    request.extensions_mut().insert(AuthUser { sub });

    Ok(next.run(request).await)
}
