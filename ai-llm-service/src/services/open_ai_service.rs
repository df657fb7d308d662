//! OpenAI-compatible chat completions (OpenAI, Groq, vLLM).
//!
//! The review prompt goes out as a single user message to
//! `POST {endpoint}/v1/chat/completions`.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, Provider, ProviderError, ProviderErrorKind},
    services::ProviderHttp,
};

#[derive(Debug)]
pub struct OpenAiService {
    http: ProviderHttp,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl OpenAiService {
    /// Requires an OpenAI provider config with an API key and an http(s) endpoint.
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        let missing_key = || ProviderError::new(Provider::OpenAI, ProviderErrorKind::MissingApiKey);
        let key = cfg.api_key.as_deref().ok_or_else(missing_key)?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {key}")).map_err(|_| missing_key())?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = ProviderHttp::new(&cfg, LlmProvider::OpenAI, "/v1/chat/completions", headers)?;
        info!(model = %cfg.model, timeout_secs = http.timeout().as_secs(), "chat completions client ready");

        Ok(Self {
            http,
            model: cfg.model,
            temperature: cfg.temperature,
            max_tokens: cfg.max_tokens,
        })
    }

    /// Returns the first non-blank message content of the completion.
    #[instrument(skip_all, fields(model = %self.model, prompt_len = prompt.len()))]
    pub async fn generate(&self, prompt: &str) -> Result<String, AiLlmError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [UserMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let completion: ChatResponse = self.http.post_json(&request).await?;
        let content = completion.choices.into_iter().find_map(|c| c.message.content);
        self.http.non_blank(content)
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [UserMessage<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}
