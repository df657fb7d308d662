//! Provider facade with enum dispatch (no trait objects).

use tracing::debug;

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::AiLlmError,
    services::{ollama_service::OllamaService, open_ai_service::OpenAiService},
};

/// Concrete text-generation client selected by [`LlmModelConfig::provider`].
///
/// Built once at startup and shared behind an `Arc`; each variant keeps its
/// own pooled `reqwest::Client`.
#[derive(Debug)]
pub enum LlmClient {
    OpenAi(OpenAiService),
    Ollama(OllamaService),
}

impl LlmClient {
    /// Builds the client for the configured provider.
    pub fn from_config(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        debug!(provider = ?cfg.provider, model = %cfg.model, "initializing LLM client");
        Ok(match cfg.provider {
            LlmProvider::OpenAI => LlmClient::OpenAi(OpenAiService::new(cfg)?),
            LlmProvider::Ollama => LlmClient::Ollama(OllamaService::new(cfg)?),
        })
    }

    /// Single non-streaming generation call. No retries.
    pub async fn generate(&self, prompt: &str) -> Result<String, AiLlmError> {
        match self {
            LlmClient::OpenAi(c) => c.generate(prompt).await,
            LlmClient::Ollama(c) => c.generate(prompt).await,
        }
    }
}
