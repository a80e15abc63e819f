//! Fetching raw trending data over HTTP.
//!
//! The fetcher only moves bytes: it returns the status code and body exactly
//! as received and leaves interpretation to [`crate::normalize`].

mod error;
mod query;

pub use error::FetchError;
pub use query::{github_search_query, ossinsight_language, ApiSource, Period, TrendingQuery};

use crate::config::ApiConfig;
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info_span, Instrument};
use url::Url;

/// User agent sent with every request.
const USER_AGENT: &str = concat!("trending-notifier/", env!("CARGO_PKG_VERSION"));

/// Path of the OSS Insight trending endpoint, relative to the base URL.
const OSSINSIGHT_TRENDS_PATH: &str = "v1/trends/repos/";

/// Path of the GitHub repository search endpoint, relative to the base URL.
const GITHUB_SEARCH_PATH: &str = "search/repositories";

/// An upstream response as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Returns true for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Source of raw trending data.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Performs a single fetch for the given query. No retries.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the request cannot be completed.
    async fn fetch(&self, query: &TrendingQuery) -> Result<RawResponse, FetchError>;
}

/// HTTP fetcher for the OSS Insight and GitHub search APIs.
pub struct HttpFetcher {
    client: Client,
    source: ApiSource,
    base_url: String,
    github_base_url: String,
    github_token: Option<String>,
}

impl HttpFetcher {
    /// Builds a fetcher from the API configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            source: config.source,
            base_url: config.base_url.clone(),
            github_base_url: config.github_base_url.clone(),
            github_token: config.github_token.clone(),
        })
    }

    /// Builds the request URL for a query.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidUrl`] if the configured base URL is invalid.
    pub fn request_url(&self, query: &TrendingQuery, today: NaiveDate) -> Result<Url, FetchError> {
        match self.source {
            ApiSource::Ossinsight => {
                let mut url = endpoint(&self.base_url, OSSINSIGHT_TRENDS_PATH)?;
                url.query_pairs_mut()
                    .append_pair("period", query.period.ossinsight_param())
                    .append_pair("language", &ossinsight_language(&query.language));
                Ok(url)
            }
            ApiSource::GithubSearch => {
                let mut url = endpoint(&self.github_base_url, GITHUB_SEARCH_PATH)?;
                url.query_pairs_mut()
                    .append_pair("q", &github_search_query(query, today))
                    .append_pair("sort", "stars")
                    .append_pair("order", "desc")
                    .append_pair("per_page", &query.limit.to_string());
                Ok(url)
            }
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, query: &TrendingQuery) -> Result<RawResponse, FetchError> {
        let url = self.request_url(query, Local::now().date_naive())?;
        let span = info_span!("fetch", source = self.source.as_str(), url = %url);

        async {
            let mut request = self.client.get(url.clone()).header(ACCEPT, "application/json");
            if self.source == ApiSource::GithubSearch {
                if let Some(token) = &self.github_token {
                    request = request.bearer_auth(token);
                }
            }

            let transport = |source| FetchError::Transport {
                url: url.to_string(),
                source,
            };

            let response = request.send().await.map_err(transport)?;
            let status = response.status().as_u16();
            let body = response.bytes().await.map_err(transport)?.to_vec();

            debug!(status, bytes = body.len(), "Received response");
            Ok::<_, FetchError>(RawResponse { status, body })
        }
        .instrument(span)
        .await
    }
}

/// Joins a relative path onto a base URL, tolerating a missing trailing slash.
fn endpoint(base: &str, path: &str) -> Result<Url, FetchError> {
    let base = format!("{}/", base.trim_end_matches('/'));
    let invalid = |source| FetchError::InvalidUrl {
        url: base.clone(),
        source,
    };

    Url::parse(&base).map_err(invalid)?.join(path).map_err(invalid)
}
