//! Bearer-credential gate placed in front of protected routes.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
};

/// Validates `Authorization: Bearer <token>` and stores the resulting
/// [`session_auth::SessionClaims`] in the request extensions.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let token = bearer_token(request.headers()).ok_or(AppError::NotAuthenticated)?;

    let claims = state.sessions.validate(token).map_err(|e| {
        warn!(error = %e, "session credential rejected");
        AppError::from(e)
    })?;
    debug!(exp = claims.exp, "session credential accepted");

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
