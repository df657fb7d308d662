use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use pr_reviewer::ReviewError;
use serde::Serialize;
use session_auth::SessionError;
use thiserror::Error;
use tracing::error;

use crate::core::app_config::ConfigError;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to initialise component: {0}")]
    Startup(String),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("{0}")]
    BadRequest(String),

    #[error("Not authenticated")]
    NotAuthenticated,

    /// Rich HTTP error mapped from lower layers with specific status & code.
    #[error("{message}")]
    Http {
        status: StatusCode,
        code: &'static str,
        message: String,
    },
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Config(_) | AppError::Startup(_) => StatusCode::INTERNAL_SERVER_ERROR, // startup-only
            AppError::Bind(_) | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            AppError::Http { status, .. } => *status,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Startup(_) => "STARTUP_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::NotAuthenticated => "NOT_AUTHENTICATED",
            AppError::Http { code, .. } => code,
        }
    }

    fn http(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        AppError::Http {
            status,
            code,
            message: message.into(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = self.error_code(), error = %self, "request failed");
        }
        let body = ErrorBody {
            error: self.error_code(),
            detail: self.to_string(),
        };
        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest(err.body_text())
    }
}

impl From<axum::extract::rejection::QueryRejection> for AppError {
    fn from(err: axum::extract::rejection::QueryRejection) -> Self {
        AppError::BadRequest(err.body_text())
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Expired => AppError::http(
                StatusCode::UNAUTHORIZED,
                "TOKEN_EXPIRED",
                err.to_string(),
            ),
            SessionError::InvalidToken(_) => {
                AppError::http(StatusCode::FORBIDDEN, "INVALID_TOKEN", err.to_string())
            }
            SessionError::AuthExchange(_) => {
                AppError::http(StatusCode::BAD_REQUEST, "GITHUB_AUTH_FAILED", err.to_string())
            }
            SessionError::Timeout => {
                AppError::http(StatusCode::REQUEST_TIMEOUT, "TIMEOUT", err.to_string())
            }
            SessionError::Upstream(_) | SessionError::Signing(_) | SessionError::Config(_) => {
                AppError::http(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UPSTREAM_ERROR",
                    err.to_string(),
                )
            }
        }
    }
}

impl From<ReviewError> for AppError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::BadRequest(_) => AppError::http(
                StatusCode::BAD_REQUEST,
                "INVALID_REPOSITORY_URL",
                err.to_string(),
            ),
            ReviewError::PullRequestNotFound { .. } => {
                AppError::http(StatusCode::NOT_FOUND, "PR_NOT_FOUND", err.to_string())
            }
            ReviewError::AlreadyMerged { .. } => {
                AppError::http(StatusCode::BAD_REQUEST, "PR_ALREADY_MERGED", err.to_string())
            }
            ReviewError::Upstream(_) => AppError::http(
                StatusCode::INTERNAL_SERVER_ERROR,
                "UPSTREAM_ERROR",
                err.to_string(),
            ),
            ReviewError::Generation(_) => AppError::http(
                StatusCode::INTERNAL_SERVER_ERROR,
                "GENERATION_FAILED",
                format!("Failed to review pull request: {err}"),
            ),
        }
    }
}
