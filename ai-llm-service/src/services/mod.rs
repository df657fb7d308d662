//! Concrete provider clients and the request plumbing they share.
//!
//! Each client sends one non-streaming prompt and returns the generated text.

pub mod ollama_service;
pub mod open_ai_service;

use std::time::{Duration, Instant};

use reqwest::header::HeaderMap;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, HttpError, Provider, ProviderError, ProviderErrorKind, make_snippet},
};

/// Used when the config carries no explicit timeout.
const FALLBACK_TIMEOUT: Duration = Duration::from_secs(60);

/// Pooled HTTP client bound to one provider and one target URL.
#[derive(Debug)]
pub(crate) struct ProviderHttp {
    provider: Provider,
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl ProviderHttp {
    /// Checks that `cfg` targets `expected` and builds a client posting to
    /// `{cfg.endpoint}{route}`.
    pub(crate) fn new(
        cfg: &LlmModelConfig,
        expected: LlmProvider,
        route: &str,
        headers: HeaderMap,
    ) -> Result<Self, AiLlmError> {
        let provider = match expected {
            LlmProvider::OpenAI => Provider::OpenAI,
            LlmProvider::Ollama => Provider::Ollama,
        };
        if cfg.provider != expected {
            return Err(ProviderError::new(provider, ProviderErrorKind::InvalidProvider).into());
        }

        let base = cfg.endpoint.trim().trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ProviderError::new(
                provider,
                ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
            )
            .into());
        }

        let timeout = cfg.timeout_secs.map(Duration::from_secs).unwrap_or(FALLBACK_TIMEOUT);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            provider,
            client,
            url: format!("{base}{route}"),
            timeout,
        })
    }

    pub(crate) fn timeout(&self) -> Duration {
        self.timeout
    }

    /// POSTs `body` as JSON and decodes a successful response as `R`.
    pub(crate) async fn post_json<B, R>(&self, body: &B) -> Result<R, AiLlmError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let started = Instant::now();
        debug!(provider = ?self.provider, "POST {}", self.url);

        let resp = self
            .client
            .post(&self.url)
            .json(body)
            .send()
            .await
            .map_err(|e| AiLlmError::from_transport(e, self.timeout))?;

        let status = resp.status();
        if !status.is_success() {
            let snippet = make_snippet(&resp.text().await.unwrap_or_default());
            warn!(
                provider = ?self.provider,
                %status,
                %snippet,
                latency_ms = started.elapsed().as_millis(),
                "generation endpoint returned non-success status"
            );
            return Err(self.fail(ProviderErrorKind::HttpStatus(HttpError {
                status,
                url: self.url.clone(),
                snippet,
            })));
        }

        let decoded = resp.json::<R>().await.map_err(|e| {
            if e.is_timeout() {
                AiLlmError::Timeout(self.timeout)
            } else {
                self.fail(ProviderErrorKind::Decode(e.to_string()))
            }
        })?;
        debug!(
            provider = ?self.provider,
            latency_ms = started.elapsed().as_millis(),
            "generation response decoded"
        );
        Ok(decoded)
    }

    /// Accepts only text with at least one non-whitespace character.
    ///
    /// A blank completion is reported as [`ProviderErrorKind::EmptyChoices`]
    /// instead of being passed on as an empty review.
    pub(crate) fn non_blank(&self, text: Option<String>) -> Result<String, AiLlmError> {
        text.filter(|t| !t.trim().is_empty())
            .ok_or_else(|| self.fail(ProviderErrorKind::EmptyChoices))
    }

    fn fail(&self, kind: ProviderErrorKind) -> AiLlmError {
        ProviderError::new(self.provider, kind).into()
    }
}
