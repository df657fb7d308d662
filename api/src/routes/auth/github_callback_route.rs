use std::sync::Arc;

use axum::extract::{Json, Query, State, rejection::QueryRejection};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{core::app_state::AppState, error_handler::AppResult};

/// Query string GitHub appends when redirecting back.
#[derive(Debug, Deserialize)]
pub struct GithubCallbackQuery {
    /// Single-use authorization code.
    pub code: String,
}

/// Session credential for the caller.
#[derive(Debug, Serialize)]
pub struct GithubCallbackResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

/// Exchanges the OAuth `code` for a session credential.
#[instrument(name = "github_callback_route", skip_all)]
pub async fn github_callback(
    State(state): State<Arc<AppState>>,
    query: Result<Query<GithubCallbackQuery>, QueryRejection>,
) -> AppResult<Json<GithubCallbackResponse>> {
    let Query(query) = query?;

    let session = state.sessions.exchange_code(&query.code).await?;
    info!(expires_at = %session.expires_at, "GitHub login completed");

    Ok(Json(GithubCallbackResponse {
        access_token: session.access_token,
        token_type: session.token_type,
    }))
}
