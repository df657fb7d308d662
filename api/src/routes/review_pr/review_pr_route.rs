use std::sync::Arc;

use axum::{
    Extension,
    extract::{Json, State, rejection::JsonRejection},
};
use pr_context_engine::PullRequestRef;
use pr_reviewer::ReviewFeedback;
use session_auth::SessionClaims;
use tracing::{info, instrument};

use crate::{core::app_state::AppState, error_handler::AppResult};

/// HTTP endpoint for reviewing a GitHub pull request.
///
/// Body is `{repository_url, pr_number}`. Sits behind the session gate, so
/// `claims` is always present here. Responds with the labeled suggestions or
/// a single error; never a partial review.
#[instrument(name = "review_pr_route", skip_all)]
pub async fn review_pr(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<SessionClaims>,
    body: Result<Json<PullRequestRef>, JsonRejection>,
) -> AppResult<Json<ReviewFeedback>> {
    let Json(pr) = body?;
    info!(repository_url = %pr.repository_url, pr_number = pr.pr_number, "review requested");

    let feedback = state.reviewer.review(&claims, &pr).await?;
    Ok(Json(feedback))
}
