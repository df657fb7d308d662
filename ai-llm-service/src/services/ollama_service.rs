//! Local Ollama runtime via `POST {endpoint}/api/generate` with streaming off.

use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::AiLlmError,
    services::ProviderHttp,
};

#[derive(Debug)]
pub struct OllamaService {
    http: ProviderHttp,
    model: String,
    options: SamplingOptions,
}

impl OllamaService {
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        let http = ProviderHttp::new(&cfg, LlmProvider::Ollama, "/api/generate", HeaderMap::new())?;
        Ok(Self {
            http,
            options: SamplingOptions {
                temperature: cfg.temperature,
                num_predict: cfg.max_tokens,
            },
            model: cfg.model,
        })
    }

    #[instrument(skip_all, fields(model = %self.model, prompt_len = prompt.len()))]
    pub async fn generate(&self, prompt: &str) -> Result<String, AiLlmError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: &self.options,
        };
        let out: GenerateResponse = self.http.post_json(&request).await?;
        self.http.non_blank(out.response)
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: &'a SamplingOptions,
}

#[derive(Debug, Serialize)]
struct SamplingOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}
