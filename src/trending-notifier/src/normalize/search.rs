//! GitHub repository search shape (`/search/repositories`).

use super::candidate::Candidate;
use super::nullable;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default, deserialize_with = "nullable")]
    items: Option<Vec<SearchItem>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchItem {
    #[serde(deserialize_with = "nullable")]
    id: u64,
    #[serde(deserialize_with = "nullable")]
    full_name: String,
    #[serde(deserialize_with = "nullable")]
    description: String,
    #[serde(deserialize_with = "nullable")]
    language: String,
    #[serde(deserialize_with = "nullable")]
    stargazers_count: u64,
    #[serde(deserialize_with = "nullable")]
    forks_count: u64,
    #[serde(deserialize_with = "nullable")]
    html_url: String,
    #[serde(deserialize_with = "nullable")]
    owner: SearchOwner,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchOwner {
    #[serde(deserialize_with = "nullable")]
    login: String,
}

/// Decodes a search response. An empty `items` list still matches.
pub(super) fn decode(value: &Value) -> Option<Vec<Candidate>> {
    let response = SearchResponse::deserialize(value).ok()?;
    let items = response.items?;

    Some(items.into_iter().map(Candidate::from).collect())
}

impl From<SearchItem> for Candidate {
    fn from(item: SearchItem) -> Self {
        Self {
            repo_id: item.id,
            full_name: item.full_name,
            owner: item.owner.login,
            description: item.description,
            language: item.language,
            stars: item.stargazers_count,
            forks: item.forks_count,
            stargazers_count: item.stargazers_count,
            forks_count: item.forks_count,
            url: item.html_url,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_native_fields() {
        let value = json!({
            "total_count": 1,
            "incomplete_results": false,
            "items": [{
                "id": 10270250,
                "name": "react",
                "full_name": "facebook/react",
                "description": null,
                "language": "JavaScript",
                "stargazers_count": 230000,
                "forks_count": 47000,
                "html_url": "https://github.com/facebook/react",
                "owner": {"login": "facebook"}
            }]
        });

        let candidates = decode(&value).unwrap();
        let candidate = &candidates[0];
        assert_eq!(candidate.repo_id, 10270250);
        assert_eq!(candidate.owner, "facebook");
        assert_eq!(candidate.description, "");
        assert_eq!(candidate.stars, 230000);
        assert_eq!(candidate.url, "https://github.com/facebook/react");
        assert_eq!(candidate.pushes, None);
    }

    #[test]
    fn empty_items_still_match() {
        let value = json!({"total_count": 0, "incomplete_results": false, "items": []});
        assert_eq!(decode(&value).unwrap().len(), 0);
    }

    #[test]
    fn missing_items_does_not_match() {
        let value = json!({"data": []});
        assert!(decode(&value).is_none());
    }
}
