//! Process-wide configuration, read once from the environment at startup.

use std::time::Duration as StdDuration;

use ai_llm_service::{AiLlmError, LlmModelConfig, config::default_config::config_review_from_env};
use chrono::Duration;
use pr_context_engine::{ExtensionAllowlist, GitHubConfig, git_providers::github::DEFAULT_GITHUB_API};
use session_auth::{
    DEFAULT_OAUTH_BASE, DEFAULT_SESSION_TTL_MINUTES, OAUTH_EXCHANGE_TIMEOUT, OAuthApp,
    SessionConfig,
};
use thiserror::Error;

const DEFAULT_API_ADDRESS: &str = "127.0.0.1:8000";
const DEFAULT_GITHUB_TIMEOUT_SECS: u64 = 30;
/// Upper bound for `JWT_ACCESS_TOKEN_EXPIRE_MINUTES` (one day).
const MAX_SESSION_TTL_MINUTES: i64 = 24 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("invalid value in {var}: {reason}")]
    InvalidValue {
        var: &'static str,
        reason: &'static str,
    },

    #[error(transparent)]
    Llm(#[from] AiLlmError),
}

/// Immutable configuration handed to each component's constructor.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen address, e.g. `127.0.0.1:8000`.
    pub api_address: String,
    pub session: SessionConfig,
    pub github: GitHubConfig,
    pub llm: LlmModelConfig,
    /// Files whose names end with one of these extensions are reviewed.
    pub review_extensions: ExtensionAllowlist,
    /// Language named in the review prompt.
    pub review_language: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let ttl_minutes = env_parse::<i64>("JWT_ACCESS_TOKEN_EXPIRE_MINUTES")?
            .unwrap_or(DEFAULT_SESSION_TTL_MINUTES);
        let ttl = Some(ttl_minutes)
            .filter(|m| (1..=MAX_SESSION_TTL_MINUTES).contains(m))
            .and_then(Duration::try_minutes)
            .ok_or(ConfigError::InvalidValue {
                var: "JWT_ACCESS_TOKEN_EXPIRE_MINUTES",
                reason: "must be between 1 and 1440 minutes",
            })?;

        let session = SessionConfig {
            app: OAuthApp {
                client_id: must_env("GITHUB_CLIENT_ID")?,
                client_secret: must_env("GITHUB_CLIENT_SECRET")?,
                redirect_uri: must_env("GITHUB_REDIRECT_URI")?,
            },
            jwt_secret: must_env("JWT_SECRET_KEY")?,
            ttl,
            oauth_base: env_opt("GITHUB_OAUTH_BASE").unwrap_or_else(|| DEFAULT_OAUTH_BASE.into()),
            exchange_timeout: OAUTH_EXCHANGE_TIMEOUT,
        };

        let github = GitHubConfig {
            base_api: env_opt("GITHUB_API_BASE").unwrap_or_else(|| DEFAULT_GITHUB_API.into()),
            token: must_env("GITHUB_TOKEN")?,
            timeout: StdDuration::from_secs(
                env_parse::<u64>("GITHUB_TIMEOUT_SECS")?.unwrap_or(DEFAULT_GITHUB_TIMEOUT_SECS),
            ),
        };

        let review_extensions = match env_opt("REVIEW_FILE_EXTENSIONS") {
            Some(list) => {
                let parsed = ExtensionAllowlist::parse_list(&list);
                if parsed.is_empty() {
                    return Err(ConfigError::InvalidValue {
                        var: "REVIEW_FILE_EXTENSIONS",
                        reason: "expected a comma separated list such as `.py,.pyi`",
                    });
                }
                parsed
            }
            None => ExtensionAllowlist::default(),
        };

        Ok(Self {
            api_address: env_opt("API_ADDRESS").unwrap_or_else(|| DEFAULT_API_ADDRESS.into()),
            session,
            github,
            llm: config_review_from_env()?,
            review_extensions,
            review_language: env_opt("REVIEW_LANGUAGE").unwrap_or_else(|| "Python".into()),
        })
    }
}

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn must_env(name: &'static str) -> Result<String, ConfigError> {
    env_opt(name).ok_or(ConfigError::MissingVar(name))
}

fn env_parse<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    env_opt(name)
        .map(|v| {
            v.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
                var: name,
                reason: "expected a number",
            })
        })
        .transpose()
}
