//! Repository URL → `(owner, repo)` resolution.

use url::Url;

use crate::errors::{PrContextError, PrContextResult};
use crate::git_providers::types::RepoCoordinates;

const GITHUB_HOSTS: [&str; 2] = ["github.com", "www.github.com"];

/// Parses `https://github.com/<owner>/<repo...>` into coordinates.
///
/// The owner is the first path segment and the repository name is the rest
/// of the path. A trailing `/` or `.git` suffix is dropped.
pub fn parse(repository_url: &str) -> PrContextResult<RepoCoordinates> {
    let invalid = || PrContextError::InvalidRepositoryUrl(repository_url.to_string());

    let url = Url::parse(repository_url.trim()).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }
    let host = url.host_str().ok_or_else(invalid)?;
    if !GITHUB_HOSTS.iter().any(|h| host.eq_ignore_ascii_case(h)) {
        return Err(invalid());
    }

    let path = url.path().trim_matches('/');
    let (owner, rest) = path.split_once('/').ok_or_else(invalid)?;
    let repo = rest.trim_end_matches('/');
    let repo = repo.strip_suffix(".git").unwrap_or(repo);

    if owner.is_empty() || repo.is_empty() || repo.split('/').any(str::is_empty) {
        return Err(invalid());
    }

    Ok(RepoCoordinates {
        owner: owner.to_string(),
        repo: repo.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://github.com/acme/widgets", "acme", "widgets")]
    #[case("https://github.com/acme/widgets/", "acme", "widgets")]
    #[case("https://github.com/acme/widgets.git", "acme", "widgets")]
    #[case("  http://www.github.com/acme/widgets  ", "acme", "widgets")]
    #[case("https://github.com/acme/widgets?tab=readme", "acme", "widgets")]
    #[case("https://github.com/acme/tools/cli", "acme", "tools/cli")]
    fn accepts(#[case] input: &str, #[case] owner: &str, #[case] repo: &str) {
        let c = parse(input).unwrap();
        assert_eq!(c.owner, owner);
        assert_eq!(c.repo, repo);
    }

    #[rstest]
    #[case("not-a-url")]
    #[case("")]
    #[case("https://github.com/")]
    #[case("https://github.com/acme")]
    #[case("https://github.com/acme/")]
    #[case("https://github.com//widgets")]
    #[case("https://gitlab.com/acme/widgets")]
    #[case("ftp://github.com/acme/widgets")]
    fn rejects(#[case] input: &str) {
        assert!(matches!(
            parse(input),
            Err(PrContextError::InvalidRepositoryUrl(u)) if u == input
        ));
    }

    #[test]
    fn slug_joins_owner_and_repo() {
        let c = parse("https://github.com/acme/widgets").unwrap();
        assert_eq!(c.slug(), "acme/widgets");
    }
}
