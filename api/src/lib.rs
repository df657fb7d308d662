//! HTTP surface of the review backend.
//!
//! Public routes run the GitHub login; `/review_pr` sits behind the session
//! gate. All failures leave through [`error_handler::AppError`].

pub mod core;
pub mod error_handler;
pub mod middleware_layer;
pub mod routes;

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::{
    core::{app_config::AppConfig, app_state::AppState},
    error_handler::AppError,
    middleware_layer::session_gate::require_session,
    routes::{
        auth::{github_callback_route::github_callback, github_login_route::github_login},
        review_pr::review_pr_route::review_pr,
    },
};

/// Assembles the router; exposed so tests can drive it without a socket.
pub fn build_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/review_pr/", post(review_pr))
        .route("/review_pr", post(review_pr))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    Router::new()
        .route("/login/github", get(github_login))
        .route("/github/callback", get(github_callback))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Reads config from the environment, binds `API_ADDRESS` and serves until Ctrl+C.
pub async fn start() -> Result<(), AppError> {
    let config = AppConfig::from_env()?;
    let state = Arc::new(AppState::from_config(&config)?);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.api_address)
        .await
        .map_err(AppError::Bind)?;
    info!(address = %config.api_address, "review API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("review API stopped");
    Ok(())
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
