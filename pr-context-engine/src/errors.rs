//! Crate-wide error hierarchy for pr-context-engine.

use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type PrContextResult<T> = Result<T, PrContextError>;

/// Root error type for the pr-context-engine crate.
#[derive(Debug, Error)]
pub enum PrContextError {
    /// The repository URL is not `https://github.com/<owner>/<repo>`.
    #[error("invalid repository URL '{0}', expected https://github.com/<owner>/<repo>")]
    InvalidRepositoryUrl(String),

    /// The hosting API reported the pull request (or its repository) as missing.
    #[error("Invalid pull request number #{number}. PR not found in the repository.")]
    PullRequestNotFound { number: u64 },

    /// Merged pull requests are final and are not reviewed.
    #[error("The pull request #{number} has already been merged and cannot be reviewed.")]
    AlreadyMerged { number: u64 },

    /// Any other hosting API failure.
    #[error("Error in fetching PR details: {0}")]
    Provider(#[from] ProviderError),

    /// Configuration problems (missing token, bad base URL).
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Provider-specific error used inside the provider layer.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Unauthorized (HTTP 401).
    #[error("unauthorized")]
    Unauthorized,

    /// Forbidden (HTTP 403).
    #[error("forbidden")]
    Forbidden,

    /// Not found (HTTP 404).
    #[error("not found")]
    NotFound,

    /// Rate limited (HTTP 429).
    #[error("rate limited")]
    RateLimited {
        /// Optional `Retry-After` hint in seconds when available.
        retry_after_secs: Option<u64>,
    },

    /// Gateway / server error (HTTP 5xx).
    #[error("server error: status {0}")]
    Server(u16),

    /// Other HTTP status (non-2xx) not covered by specific variants.
    #[error("http status error: status {0}")]
    HttpStatus(u16),

    /// Timeout at transport level.
    #[error("timeout")]
    Timeout,

    /// Network/transport failure without HTTP status (DNS/connect/reset).
    #[error("network error: {0}")]
    Network(String),

    /// Unexpected/invalid shape of provider response.
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Maps a non-2xx HTTP status to a provider error.
    pub fn from_status(code: u16, retry_after_secs: Option<u64>) -> Self {
        match code {
            401 => ProviderError::Unauthorized,
            403 => ProviderError::Forbidden,
            404 => ProviderError::NotFound,
            429 => ProviderError::RateLimited { retry_after_secs },
            500..=599 => ProviderError::Server(code),
            _ => ProviderError::HttpStatus(code),
        }
    }
}

/// Configuration and setup errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required provider access token.
    #[error("missing provider token")]
    MissingToken,

    /// Invalid base API URL.
    #[error("invalid base api url: {0}")]
    InvalidBaseUrl(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return ProviderError::Timeout;
        }
        if e.is_decode() {
            return ProviderError::InvalidResponse(e.to_string());
        }
        if let Some(status) = e.status() {
            return ProviderError::from_status(status.as_u16(), None);
        }
        ProviderError::Network(e.to_string())
    }
}

impl From<reqwest::Error> for PrContextError {
    fn from(e: reqwest::Error) -> Self {
        PrContextError::Provider(ProviderError::from(e))
    }
}
