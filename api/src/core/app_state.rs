use std::sync::Arc;

use ai_llm_service::LlmClient;
use pr_context_engine::GitHubClient;
use pr_reviewer::{ReviewOrchestrator, SuggestionGenerator};
use session_auth::SessionAuthenticator;

use crate::{core::app_config::AppConfig, error_handler::AppError};

/// Shared state for all HTTP handlers. Read-only after startup.
#[derive(Debug, Clone)]
pub struct AppState {
    /// OAuth exchange and session credential checks.
    pub sessions: SessionAuthenticator,
    /// The review pipeline.
    pub reviewer: ReviewOrchestrator,
}

impl AppState {
    /// Builds every component from the immutable config.
    pub fn from_config(cfg: &AppConfig) -> Result<Self, AppError> {
        let sessions = SessionAuthenticator::new(cfg.session.clone())
            .map_err(|e| AppError::Startup(e.to_string()))?;
        let github = GitHubClient::new(cfg.github.clone())
            .map_err(|e| AppError::Startup(e.to_string()))?;
        let llm = LlmClient::from_config(cfg.llm.clone())
            .map_err(|e| AppError::Startup(e.to_string()))?;

        let generator = SuggestionGenerator::new(Arc::new(llm), cfg.review_language.clone());
        let reviewer =
            ReviewOrchestrator::new(github, generator, cfg.review_extensions.clone());

        Ok(Self { sessions, reviewer })
    }
}
