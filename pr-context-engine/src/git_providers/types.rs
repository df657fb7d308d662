//! Data model for pull requests and their changed files.

use serde::{Deserialize, Serialize};

/// `owner/repo` pair parsed from a repository URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoCoordinates {
    pub owner: String,
    pub repo: String,
}

impl RepoCoordinates {
    /// `owner/repo` slug as used in API paths and logs.
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// A pull request to review, as supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestRef {
    pub repository_url: String,
    pub pr_number: u64,
}

/// Subset of pull request metadata needed before touching any file data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestMeta {
    pub number: u64,
    pub title: String,
    pub state: String,
    pub merged: bool,
    pub html_url: String,
}

/// One changed file of a pull request.
///
/// `patch` is empty for binary files and rename-only changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedFile {
    pub filename: String,
    pub status: String,
    pub patch: String,
}
