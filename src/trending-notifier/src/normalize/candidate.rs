//! Shape-neutral intermediate record and the shared fallback pass.

use crate::repository::{github_url, owner_of, Repository};

/// A decoded upstream row before fallbacks and ranking are applied.
///
/// Each shape decoder fills in whatever its shape provides; the alternate
/// fields (`web_url`, `stargazers_count`, `forks_count`) feed the fallback
/// rules in [`Candidate::into_repository`].
#[derive(Debug, Clone, Default)]
pub(super) struct Candidate {
    pub repo_id: u64,
    pub full_name: String,
    pub owner: String,
    pub description: String,
    pub language: String,
    pub stars: u64,
    pub stars_delta: u64,
    pub forks: u64,
    pub forks_delta: u64,
    pub pushes: Option<u64>,
    pub pull_requests: Option<u64>,
    pub url: String,
    pub web_url: String,
    pub stargazers_count: u64,
    pub forks_count: u64,
}

impl Candidate {
    /// Applies the fallback rules and assigns the final rank.
    pub(super) fn into_repository(self, rank: usize) -> Repository {
        let mut url = self.url;
        if url.is_empty() && !self.web_url.is_empty() {
            url = self.web_url;
        }
        if url.is_empty() {
            url = github_url(&self.full_name);
        }

        let stars = if self.stars == 0 && self.stargazers_count > 0 {
            self.stargazers_count
        } else {
            self.stars
        };

        let forks = if self.forks == 0 && self.forks_count > 0 {
            self.forks_count
        } else {
            self.forks
        };

        let owner = if self.owner.is_empty() && !self.full_name.is_empty() {
            owner_of(&self.full_name).to_string()
        } else {
            self.owner
        };

        Repository {
            repo_id: self.repo_id,
            full_name: self.full_name,
            owner,
            description: self.description,
            language: self.language,
            stars,
            stars_delta: self.stars_delta,
            forks,
            forks_delta: self.forks_delta,
            pushes: self.pushes,
            pull_requests: self.pull_requests,
            rank,
            url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(full_name: &str) -> Candidate {
        Candidate {
            full_name: full_name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn derives_owner_and_url_from_full_name() {
        let repo = named("vercel/next.js").into_repository(1);

        assert_eq!(repo.owner, "vercel");
        assert_eq!(repo.url, "https://github.com/vercel/next.js");
        assert_eq!(repo.rank, 1);
    }

    #[test]
    fn prefers_explicit_url_over_web_url() {
        let mut candidate = named("a/b");
        candidate.url = "https://example.com/a/b".to_string();
        candidate.web_url = "https://github.com/a/b".to_string();

        assert_eq!(candidate.into_repository(1).url, "https://example.com/a/b");
    }

    #[test]
    fn falls_back_to_web_url() {
        let mut candidate = named("a/b");
        candidate.web_url = "https://mirror.example.com/a/b".to_string();

        assert_eq!(
            candidate.into_repository(1).url,
            "https://mirror.example.com/a/b"
        );
    }

    #[test]
    fn adopts_alternate_counts_only_when_canonical_is_zero() {
        let mut candidate = named("a/b");
        candidate.stargazers_count = 1200;
        candidate.forks = 7;
        candidate.forks_count = 99;

        let repo = candidate.into_repository(1);
        assert_eq!(repo.stars, 1200);
        assert_eq!(repo.forks, 7);
    }

    #[test]
    fn keeps_explicit_owner() {
        let mut candidate = named("a/b");
        candidate.owner = "someone-else".to_string();

        assert_eq!(candidate.into_repository(3).owner, "someone-else");
    }

    #[test]
    fn owner_stays_empty_without_slash() {
        let repo = named("standalone").into_repository(1);
        assert_eq!(repo.owner, "");
        assert_eq!(repo.url, "https://github.com/standalone");
    }
}
