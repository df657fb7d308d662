//! Default LLM config loaded from environment variables.
//!
//! The review pipeline needs a single deterministic profile. Provider
//! defaults point at Groq's OpenAI-compatible endpoint.
//!
//! # Environment variables
//!
//! - `LLM_PROVIDER`     = `openai` (default, also `groq`) or `ollama`
//! - `LLM_ENDPOINT`     = API base (default depends on provider)
//! - `LLM_MODEL`        = model id (default depends on provider)
//! - `LLM_API_KEY` or `GROQ_API_KEY` = API key (required for `openai`)
//! - `LLM_MAX_TOKENS`   = optional max tokens (u32)
//! - `LLM_TIMEOUT_SECS` = optional request timeout (u64, default 60)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, ConfigError, env_opt, env_opt_u32, env_opt_u64, validate_http_endpoint,
    },
};

/// Default OpenAI-compatible base (Groq).
pub const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.groq.com/openai";
/// Default model served by Groq.
pub const DEFAULT_OPENAI_MODEL: &str = "llama-3.3-70b-versatile";
/// Default local Ollama base.
pub const DEFAULT_OLLAMA_ENDPOINT: &str = "http://localhost:11434";
/// Default Ollama model.
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.1:8b";
/// Default generation timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Constructs the **review** profile: deterministic sampling (`temperature = 0.0`).
///
/// # Errors
///
/// - [`ConfigError::UnsupportedProvider`] for an unknown `LLM_PROVIDER`
/// - [`ConfigError::MissingVar`] if the OpenAI-compatible provider has no key
/// - [`ConfigError::InvalidFormat`] if `LLM_ENDPOINT` is not http(s)
/// - [`ConfigError::InvalidNumber`] for bad `LLM_MAX_TOKENS` / `LLM_TIMEOUT_SECS`
pub fn config_review_from_env() -> Result<LlmModelConfig, AiLlmError> {
    let provider = match env_opt("LLM_PROVIDER") {
        Some(p) => p.parse::<LlmProvider>()?,
        None => LlmProvider::OpenAI,
    };

    let (default_endpoint, default_model) = match provider {
        LlmProvider::OpenAI => (DEFAULT_OPENAI_ENDPOINT, DEFAULT_OPENAI_MODEL),
        LlmProvider::Ollama => (DEFAULT_OLLAMA_ENDPOINT, DEFAULT_OLLAMA_MODEL),
    };

    let endpoint = env_opt("LLM_ENDPOINT").unwrap_or_else(|| default_endpoint.to_string());
    validate_http_endpoint("LLM_ENDPOINT", endpoint.trim())?;

    let model = env_opt("LLM_MODEL").unwrap_or_else(|| default_model.to_string());

    let api_key = env_opt("LLM_API_KEY").or_else(|| env_opt("GROQ_API_KEY"));
    if provider == LlmProvider::OpenAI && api_key.is_none() {
        return Err(ConfigError::MissingVar("LLM_API_KEY or GROQ_API_KEY").into());
    }

    Ok(LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key,
        max_tokens: env_opt_u32("LLM_MAX_TOKENS")?,
        temperature: Some(0.0),
        timeout_secs: Some(env_opt_u64("LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 7] = [
        "LLM_PROVIDER",
        "LLM_ENDPOINT",
        "LLM_MODEL",
        "LLM_API_KEY",
        "GROQ_API_KEY",
        "LLM_MAX_TOKENS",
        "LLM_TIMEOUT_SECS",
    ];

    fn with_env<R>(set: &[(&str, &str)], f: impl FnOnce() -> R) -> R {
        let vars: Vec<(&str, Option<&str>)> = VARS
            .iter()
            .map(|k| (*k, set.iter().find(|(n, _)| n == k).map(|(_, v)| *v)))
            .collect();
        temp_env::with_vars(vars, f)
    }

    #[test]
    fn groq_defaults_with_key() {
        let cfg = with_env(&[("GROQ_API_KEY", "gsk_test")], config_review_from_env).unwrap();
        assert_eq!(cfg.provider, LlmProvider::OpenAI);
        assert_eq!(cfg.endpoint, DEFAULT_OPENAI_ENDPOINT);
        assert_eq!(cfg.model, DEFAULT_OPENAI_MODEL);
        assert_eq!(cfg.api_key.as_deref(), Some("gsk_test"));
        assert_eq!(cfg.temperature, Some(0.0));
        assert_eq!(cfg.timeout_secs, Some(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn openai_requires_key() {
        let err = with_env(&[], config_review_from_env).unwrap_err();
        assert!(matches!(err, AiLlmError::Config(ConfigError::MissingVar(_))));
    }

    #[test]
    fn ollama_needs_no_key_and_reads_overrides() {
        let cfg = with_env(
            &[
                ("LLM_PROVIDER", "ollama"),
                ("LLM_MODEL", "qwen3:14b"),
                ("LLM_TIMEOUT_SECS", "15"),
                ("LLM_MAX_TOKENS", "512"),
            ],
            config_review_from_env,
        )
        .unwrap();
        assert_eq!(cfg.provider, LlmProvider::Ollama);
        assert_eq!(cfg.endpoint, DEFAULT_OLLAMA_ENDPOINT);
        assert_eq!(cfg.model, "qwen3:14b");
        assert_eq!(cfg.timeout_secs, Some(15));
        assert_eq!(cfg.max_tokens, Some(512));
    }

    #[test]
    fn bad_number_is_rejected() {
        let err = with_env(
            &[("LLM_PROVIDER", "ollama"), ("LLM_TIMEOUT_SECS", "soon")],
            config_review_from_env,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Config(ConfigError::InvalidNumber { var: "LLM_TIMEOUT_SECS", .. })
        ));
    }
}
