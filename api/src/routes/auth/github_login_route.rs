use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::core::app_state::AppState;

/// Where the browser should go to start the GitHub OAuth flow.
#[derive(Debug, Serialize)]
pub struct GithubLoginResponse {
    pub url: String,
}

#[instrument(name = "github_login_route", skip_all)]
pub async fn github_login(State(state): State<Arc<AppState>>) -> Json<GithubLoginResponse> {
    let url = state.sessions.authorize_url().to_string();
    debug!("issuing GitHub authorize URL");
    Json(GithubLoginResponse { url })
}
