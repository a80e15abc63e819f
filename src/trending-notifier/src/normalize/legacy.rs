//! Legacy OSS Insight `{"data": [...]}` shape with partially populated rows.

use super::candidate::Candidate;
use super::nullable;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct LegacyResponse {
    #[serde(default, deserialize_with = "nullable")]
    data: Vec<LegacyRepository>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LegacyRepository {
    #[serde(deserialize_with = "nullable")]
    repo_id: i64,
    #[serde(deserialize_with = "nullable")]
    repo_name: String,
    #[serde(deserialize_with = "nullable")]
    full_name: String,
    #[serde(deserialize_with = "nullable")]
    owner: String,
    #[serde(deserialize_with = "nullable")]
    description: String,
    #[serde(deserialize_with = "nullable")]
    language: String,
    #[serde(deserialize_with = "nullable")]
    stars: i64,
    #[serde(deserialize_with = "nullable")]
    stargazers_count: i64,
    #[serde(deserialize_with = "nullable")]
    stars_delta: i64,
    #[serde(deserialize_with = "nullable")]
    forks: i64,
    #[serde(deserialize_with = "nullable")]
    forks_count: i64,
    #[serde(deserialize_with = "nullable")]
    forks_delta: i64,
    pushes: Option<i64>,
    pull_requests: Option<i64>,
    #[serde(deserialize_with = "nullable")]
    url: String,
    #[serde(deserialize_with = "nullable")]
    html_url: String,
}

/// Decodes a legacy response; any object whose `data` is a list of rows matches.
pub(super) fn decode(value: &Value) -> Option<Vec<Candidate>> {
    let response = LegacyResponse::deserialize(value).ok()?;

    Some(response.data.into_iter().map(Candidate::from).collect())
}

/// Clamps a signed upstream count to the non-negative range.
fn count(raw: i64) -> u64 {
    u64::try_from(raw).unwrap_or(0)
}

impl From<LegacyRepository> for Candidate {
    fn from(repo: LegacyRepository) -> Self {
        let full_name = if repo.repo_name.is_empty() {
            repo.full_name
        } else {
            repo.repo_name
        };

        Self {
            repo_id: count(repo.repo_id),
            full_name,
            owner: repo.owner,
            description: repo.description,
            language: repo.language,
            stars: count(repo.stars),
            stars_delta: count(repo.stars_delta),
            forks: count(repo.forks),
            forks_delta: count(repo.forks_delta),
            pushes: repo.pushes.map(count),
            pull_requests: repo.pull_requests.map(count),
            url: repo.url,
            web_url: repo.html_url,
            stargazers_count: count(repo.stargazers_count),
            forks_count: count(repo.forks_count),
            ..Default::default()
        }
    }
}
