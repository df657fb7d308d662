//! Crate-wide error hierarchy for pr-reviewer.
//!
//! Each variant is one terminal failure of the review pipeline; the HTTP
//! layer maps them to statuses.

use ai_llm_service::AiLlmError;
use pr_context_engine::{PrContextError, ProviderError};
use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type ReviewResult<T> = Result<T, ReviewError>;

#[derive(Debug, Error)]
pub enum ReviewError {
    /// Repository URL could not be resolved to `owner/repo`.
    #[error("{0}")]
    BadRequest(String),

    /// Hosting API has no such pull request.
    #[error("Invalid pull request number #{number}. PR not found in the repository.")]
    PullRequestNotFound { number: u64 },

    /// Merged pull requests are not reviewed.
    #[error("The pull request #{number} has already been merged and cannot be reviewed.")]
    AlreadyMerged { number: u64 },

    /// Any other hosting API failure.
    #[error("Error in fetching PR details: {0}")]
    Upstream(#[source] ProviderError),

    /// Text generation failed or returned nothing usable.
    #[error("Error in generating response from the language model: {0}")]
    Generation(#[source] AiLlmError),
}

impl From<PrContextError> for ReviewError {
    fn from(e: PrContextError) -> Self {
        match e {
            PrContextError::InvalidRepositoryUrl(_) => ReviewError::BadRequest(e.to_string()),
            PrContextError::PullRequestNotFound { number } => {
                ReviewError::PullRequestNotFound { number }
            }
            PrContextError::AlreadyMerged { number } => ReviewError::AlreadyMerged { number },
            PrContextError::Provider(p) => ReviewError::Upstream(p),
            // Only raised while building the client, never mid-fetch.
            PrContextError::Config(c) => {
                ReviewError::Upstream(ProviderError::InvalidResponse(c.to_string()))
            }
        }
    }
}

impl From<AiLlmError> for ReviewError {
    fn from(e: AiLlmError) -> Self {
        ReviewError::Generation(e)
    }
}
