//! Canonical trending repository record.

use serde::Serialize;

/// Base used to synthesize a repository URL when upstream omits one.
pub const GITHUB_WEB_BASE: &str = "https://github.com";

/// One trending repository, independent of the upstream shape it came from.
///
/// Records are produced by [`crate::normalize`] and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repository {
    /// Upstream identifier, zero when not supplied.
    pub repo_id: u64,

    /// Full repository name in "owner/name" format.
    pub full_name: String,

    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository description, possibly empty.
    pub description: String,

    /// Primary language, empty when unspecified.
    pub language: String,

    /// Total stars.
    pub stars: u64,

    /// Stars gained within the queried period.
    pub stars_delta: u64,

    /// Total forks.
    pub forks: u64,

    /// Forks gained within the queried period.
    pub forks_delta: u64,

    /// Pushes within the queried period (SQL endpoint only).
    pub pushes: Option<u64>,

    /// Pull requests within the queried period (SQL endpoint only).
    pub pull_requests: Option<u64>,

    /// 1-based position in the report.
    pub rank: usize,

    /// Web URL of the repository.
    pub url: String,
}

/// Returns the owner part of an "owner/name" string.
///
/// Yields an empty string when there is no `/` or it is the first character.
#[must_use]
pub fn owner_of(full_name: &str) -> &str {
    match full_name.find('/') {
        Some(idx) if idx > 0 => &full_name[..idx],
        _ => "",
    }
}

/// Builds the GitHub web URL for a repository.
#[must_use]
pub fn github_url(full_name: &str) -> String {
    format!("{GITHUB_WEB_BASE}/{full_name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_of_splits_on_first_slash() {
        assert_eq!(owner_of("vercel/next.js"), "vercel");
        assert_eq!(owner_of("a/b/c"), "a");
    }

    #[test]
    fn owner_of_without_slash_is_empty() {
        assert_eq!(owner_of("standalone"), "");
        assert_eq!(owner_of("/leading"), "");
        assert_eq!(owner_of(""), "");
    }

    #[test]
    fn github_url_uses_full_name() {
        assert_eq!(
            github_url("vercel/next.js"),
            "https://github.com/vercel/next.js"
        );
    }
}
