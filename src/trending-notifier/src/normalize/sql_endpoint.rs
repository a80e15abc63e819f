//! OSS Insight SQL endpoint shape.
//!
//! Every row value is a string, numbers included:
//! ```json
//! {"type": "sql_endpoint", "data": {"columns": [...], "rows": [{"repo_name": "a/b", "stars": "12"}]}}
//! ```

use super::candidate::Candidate;
use super::nullable;
use crate::repository::owner_of;
use serde::Deserialize;
use serde_json::Value;

/// Discriminant value identifying a SQL endpoint result.
const SQL_ENDPOINT_TYPE: &str = "sql_endpoint";

#[derive(Debug, Deserialize)]
struct SqlEndpointResponse {
    #[serde(rename = "type", default, deserialize_with = "nullable")]
    kind: String,
    data: SqlEndpointData,
}

#[derive(Debug, Deserialize)]
struct SqlEndpointData {
    #[serde(default, deserialize_with = "nullable")]
    rows: Vec<SqlEndpointRow>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SqlEndpointRow {
    #[serde(deserialize_with = "nullable")]
    repo_id: String,
    #[serde(deserialize_with = "nullable")]
    repo_name: String,
    #[serde(deserialize_with = "nullable")]
    primary_language: String,
    #[serde(deserialize_with = "nullable")]
    description: String,
    #[serde(deserialize_with = "nullable")]
    stars: String,
    #[serde(deserialize_with = "nullable")]
    forks: String,
    #[serde(deserialize_with = "nullable")]
    pull_requests: String,
    #[serde(deserialize_with = "nullable")]
    pushes: String,
}

/// Decodes a SQL endpoint response.
///
/// Returns `None` unless the discriminant matches and at least one row is present.
pub(super) fn decode(value: &Value) -> Option<Vec<Candidate>> {
    let response = SqlEndpointResponse::deserialize(value).ok()?;
    if response.kind != SQL_ENDPOINT_TYPE || response.data.rows.is_empty() {
        return None;
    }

    Some(response.data.rows.into_iter().map(Candidate::from).collect())
}

/// Parses a decimal count, treating anything unparseable as zero.
fn parse_count(raw: &str) -> u64 {
    raw.parse().unwrap_or(0)
}

impl From<SqlEndpointRow> for Candidate {
    fn from(row: SqlEndpointRow) -> Self {
        let stars = parse_count(&row.stars);
        let forks = parse_count(&row.forks);

        Self {
            repo_id: parse_count(&row.repo_id),
            owner: owner_of(&row.repo_name).to_string(),
            description: row.description,
            language: row.primary_language,
            stars,
            forks,
            stargazers_count: stars,
            forks_count: forks,
            pushes: Some(parse_count(&row.pushes)),
            pull_requests: Some(parse_count(&row.pull_requests)),
            full_name: row.repo_name,
            ..Default::default()
        }
    }
}
