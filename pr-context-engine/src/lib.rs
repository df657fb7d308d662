//! Pull request context for reviews: locate the repository, fetch the
//! changed files from GitHub and reduce their patches to plain code.

pub mod errors;
pub mod git_providers;
pub mod patch;
pub mod repo_locator;

pub use errors::{PrContextError, PrContextResult, ProviderError};
pub use git_providers::{ChangedFile, GitHubClient, GitHubConfig, PullRequestRef, RepoCoordinates};
pub use patch::ExtensionAllowlist;
