//! Suggestion generation: prompt + single LLM call.

use std::sync::Arc;

use ai_llm_service::LlmClient;
use tracing::{debug, error, instrument};

use crate::errors::{ReviewError, ReviewResult};
use crate::review::prompt::build_review_prompt;

/// Wraps the configured LLM client with the review prompt.
///
/// Sampling parameters (temperature 0) and the timeout live in the client's
/// model config. No retries: one failed call fails the review.
#[derive(Debug, Clone)]
pub struct SuggestionGenerator {
    llm: Arc<LlmClient>,
    language: String,
}

impl SuggestionGenerator {
    pub fn new(llm: Arc<LlmClient>, language: impl Into<String>) -> Self {
        Self {
            llm,
            language: language.into(),
        }
    }

    #[instrument(skip_all, fields(code_len = code.len()))]
    pub async fn generate(&self, code: &str) -> ReviewResult<String> {
        let prompt = build_review_prompt(&self.language, code);
        debug!(prompt_len = prompt.len(), "requesting suggestions");

        self.llm.generate(&prompt).await.map_err(|e| {
            error!(error = %e, "suggestion generation failed");
            ReviewError::Generation(e)
        })
    }
}
