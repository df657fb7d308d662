//! GitHub provider (REST v3) for PR metadata and changed files.
//!
//! Endpoints used:
//!   * GET /repos/{owner}/{repo}/pulls/{number}
//!   * GET /repos/{owner}/{repo}/pulls/{number}/files?per_page=100&page={n}

use std::time::Duration;

use reqwest::{Client, Response, header};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::errors::{ConfigError, PrContextError, PrContextResult, ProviderError};
use crate::git_providers::types::{ChangedFile, PullRequestMeta, RepoCoordinates};

/// Default public GitHub API base.
pub const DEFAULT_GITHUB_API: &str = "https://api.github.com";

const PER_PAGE: usize = 100;
/// GitHub stops listing PR files after 3000 entries.
const MAX_PAGES: u32 = 30;

/// Static configuration for the service-level GitHub client.
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// API base, e.g. "https://api.github.com".
    pub base_api: String,
    /// Service access token (PAT or app installation token).
    pub token: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// GitHub HTTP client wrapper.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    base_api: String,
    token: String,
}

impl GitHubClient {
    /// Builds the client with a stable user agent and the configured timeout.
    pub fn new(cfg: GitHubConfig) -> PrContextResult<Self> {
        if cfg.token.trim().is_empty() {
            return Err(ConfigError::MissingToken.into());
        }
        let base = cfg.base_api.trim().trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(cfg.base_api.clone()).into());
        }

        debug!("Creating GitHubClient with base_api={}", base);

        let http = Client::builder()
            .user_agent(concat!("pr-context-engine/", env!("CARGO_PKG_VERSION")))
            .timeout(cfg.timeout)
            .build()?;

        Ok(Self {
            http,
            base_api: base.to_string(),
            token: cfg.token,
        })
    }

    /// Fetches the changed files of a pull request that is still open for review.
    ///
    /// Fails with [`PrContextError::AlreadyMerged`] before any file data is
    /// requested when the PR has been merged.
    pub async fn fetch(
        &self,
        repo: &RepoCoordinates,
        number: u64,
    ) -> PrContextResult<Vec<ChangedFile>> {
        let meta = self.get_pull(repo, number).await?;
        if meta.merged {
            warn!(
                repo = %repo.slug(),
                number,
                state = %meta.state,
                html_url = %meta.html_url,
                "pull request already merged"
            );
            return Err(PrContextError::AlreadyMerged { number });
        }

        let files = self.list_files(repo, number).await?;
        info!(
            repo = %repo.slug(),
            number,
            title = %meta.title,
            state = %meta.state,
            html_url = %meta.html_url,
            files = files.len(),
            "pull request files fetched"
        );
        Ok(files)
    }

    /// Fetches PR metadata. A 404 means the PR (or the repository) does not exist.
    pub async fn get_pull(
        &self,
        repo: &RepoCoordinates,
        number: u64,
    ) -> PrContextResult<PullRequestMeta> {
        let url = format!(
            "{}/repos/{}/{}/pulls/{}",
            self.base_api, repo.owner, repo.repo, number
        );
        debug!("GitHub get_pull: {}", url);

        let resp = match self.get(&url).await {
            Err(ProviderError::NotFound) => {
                return Err(PrContextError::PullRequestNotFound { number });
            }
            other => other?,
        };

        let pr: GitHubPr = resp.json().await?;
        Ok(PullRequestMeta {
            number: pr.number,
            title: pr.title,
            state: pr.state,
            merged: pr.merged.unwrap_or(pr.merged_at.is_some()),
            html_url: pr.html_url,
        })
    }

    /// Lists every changed file, following pagination in API order.
    pub async fn list_files(
        &self,
        repo: &RepoCoordinates,
        number: u64,
    ) -> PrContextResult<Vec<ChangedFile>> {
        let mut out = Vec::new();

        for page in 1..=MAX_PAGES {
            let url = format!(
                "{}/repos/{}/{}/pulls/{}/files?per_page={}&page={}",
                self.base_api, repo.owner, repo.repo, number, PER_PAGE, page
            );
            debug!("GitHub list_files: {}", url);

            let batch: Vec<GitHubPrFile> = self.get(&url).await?.json().await?;
            let len = batch.len();
            out.extend(batch.into_iter().map(|f| ChangedFile {
                filename: f.filename,
                status: f.status,
                patch: f.patch.unwrap_or_default(),
            }));

            if len < PER_PAGE {
                break;
            }
        }

        Ok(out)
    }

    async fn get(&self, url: &str) -> Result<Response, ProviderError> {
        let resp = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .header(header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let retry_after = resp
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        warn!(%url, status = status.as_u16(), "GitHub returned non-success status");
        Err(ProviderError::from_status(status.as_u16(), retry_after))
    }
}

/// GitHub PR response (subset).
#[derive(Debug, Deserialize)]
struct GitHubPr {
    number: u64,
    title: String,
    state: String,
    html_url: String,
    merged: Option<bool>,
    merged_at: Option<String>,
}

/// GitHub PR file entry (subset).
#[derive(Debug, Deserialize)]
struct GitHubPrFile {
    filename: String,
    status: String,
    patch: Option<String>,
}
