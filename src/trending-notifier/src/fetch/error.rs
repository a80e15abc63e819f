//! Fetch error types.

use thiserror::Error;

/// Errors that can occur while fetching trending data.
///
/// Non-success HTTP statuses are not errors here; the status travels with the
/// body and is judged by the normalizer.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// A configured base URL is not valid.
    #[error("Invalid API URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The request could not be completed (DNS, timeout, connection, body read).
    #[error("Request to '{url}' failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}
