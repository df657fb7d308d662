//! Public entry for the pr-reviewer pipeline.
//!
//! One call reviews one pull request, all-or-nothing:
//!
//! 1) **Authenticated** – the caller presents validated [`SessionClaims`]
//!    (the session gate in front of the API produces them)
//! 2) **FetchingPr** – resolve `owner/repo`, load PR metadata, refuse merged
//!    PRs, list changed files
//! 3) **Sanitizing** – keep allowlisted files, strip diff decoration, join
//!    patches in API order
//! 4) **GeneratingSuggestions** – single LLM call on the fixed review prompt
//! 5) **Done** – labeled feedback block
//!
//! Any failure moves to the absorbing `Error` stage and is returned as a
//! [`ReviewError`]; nothing partial is ever returned.

pub mod errors;
pub mod review;

use std::fmt;

use pr_context_engine::{
    ChangedFile, ExtensionAllowlist, GitHubClient, PullRequestRef, patch, repo_locator,
};
use serde::Serialize;
use session_auth::SessionClaims;
use tracing::{debug, info, instrument, warn};

pub use errors::{ReviewError, ReviewResult};
pub use review::SuggestionGenerator;

/// Heading placed above the raw model output.
pub const FEEDBACK_HEADING: &str = "### AI Suggestions (Linting Issues and Code Improvements):";

/// Pipeline stages, in order. `Error` is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStage {
    AwaitingAuth,
    Authenticated,
    FetchingPr,
    Sanitizing,
    GeneratingSuggestions,
    Done,
    Error,
}

impl fmt::Display for ReviewStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Final review output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewFeedback {
    pub feedback: String,
}

impl ReviewFeedback {
    fn from_suggestions(suggestions: &str) -> Self {
        Self {
            feedback: format!("{FEEDBACK_HEADING}\n{suggestions}"),
        }
    }
}

/// Composes fetch → sanitize → generate for one pull request.
#[derive(Debug, Clone)]
pub struct ReviewOrchestrator {
    github: GitHubClient,
    generator: SuggestionGenerator,
    allowlist: ExtensionAllowlist,
}

impl ReviewOrchestrator {
    pub fn new(
        github: GitHubClient,
        generator: SuggestionGenerator,
        allowlist: ExtensionAllowlist,
    ) -> Self {
        Self {
            github,
            generator,
            allowlist,
        }
    }

    /// Reviews `pr` on behalf of an authenticated caller.
    #[instrument(
        name = "review_pr",
        skip_all,
        fields(repository_url = %pr.repository_url, pr_number = pr.pr_number)
    )]
    pub async fn review(
        &self,
        caller: &SessionClaims,
        pr: &PullRequestRef,
    ) -> ReviewResult<ReviewFeedback> {
        let mut stage = ReviewStage::AwaitingAuth;
        debug!(session_exp = caller.exp, "caller presented validated session");
        advance(&mut stage, ReviewStage::Authenticated);
        let result = self.run(pr, &mut stage).await;
        match &result {
            Ok(_) => info!(stage = %ReviewStage::Done, "review completed"),
            Err(e) => warn!(failed_at = %stage, stage = %ReviewStage::Error, error = %e, "review failed"),
        }
        result
    }

    async fn run(
        &self,
        pr: &PullRequestRef,
        stage: &mut ReviewStage,
    ) -> ReviewResult<ReviewFeedback> {
        advance(stage, ReviewStage::FetchingPr);
        let repo = repo_locator::parse(&pr.repository_url)?;
        let files = self.github.fetch(&repo, pr.pr_number).await?;

        advance(stage, ReviewStage::Sanitizing);
        let code = collect_reviewable_code(&files, &self.allowlist);
        if code.is_empty() {
            debug!(files = files.len(), "no allowlisted changes; reviewing empty code block");
        }

        advance(stage, ReviewStage::GeneratingSuggestions);
        let suggestions = self.generator.generate(&code).await?;

        Ok(ReviewFeedback::from_suggestions(&suggestions))
    }
}

fn advance(stage: &mut ReviewStage, next: ReviewStage) {
    debug!(from = %stage, to = %next, "review stage");
    *stage = next;
}

/// Cleans and joins the patches of allowlisted files, keeping fetch order.
pub fn collect_reviewable_code(files: &[ChangedFile], allowlist: &ExtensionAllowlist) -> String {
    files
        .iter()
        .filter(|f| allowlist.matches(&f.filename))
        .map(|f| patch::clean(&f.patch))
        .collect::<Vec<_>>()
        .join("\n")
}
