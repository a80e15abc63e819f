//! Upstream response normalization.
//!
//! The trending data can arrive in one of three JSON shapes. This module
//! detects which one is present and reconciles it into ranked
//! [`Repository`] records.
//!
//! Shapes are tried in a fixed order and the first match wins:
//! 1. OSS Insight SQL endpoint (`{"type": "sql_endpoint", ...}`, string-typed rows)
//! 2. GitHub repository search (`{"items": [...]}`)
//! 3. Legacy OSS Insight (`{"data": [...]}`)

mod candidate;
mod error;
mod legacy;
mod search;
mod sql_endpoint;

pub use error::NormalizeError;

use crate::fetch::RawResponse;
use crate::repository::Repository;
use candidate::Candidate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

/// Response shapes understood by the normalizer, in detection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// OSS Insight SQL endpoint result.
    SqlEndpoint,
    /// GitHub repository search result.
    Search,
    /// Legacy OSS Insight `data` list.
    Legacy,
}

impl ResponseShape {
    /// Returns the shape name for logging.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SqlEndpoint => "sql_endpoint",
            Self::Search => "search",
            Self::Legacy => "legacy",
        }
    }
}

/// Normalizes a fetched response.
///
/// A non-success status fails with [`NormalizeError::UpstreamStatus`] before the
/// body is looked at.
///
/// # Errors
///
/// See [`normalize`] for body-related failures.
pub fn normalize_response(
    response: &RawResponse,
    limit: usize,
) -> Result<Vec<Repository>, NormalizeError> {
    if !response.is_success() {
        return Err(NormalizeError::UpstreamStatus {
            status: response.status,
            body: String::from_utf8_lossy(&response.body).into_owned(),
        });
    }

    normalize(&response.body, limit)
}

/// Normalizes a raw response body into ranked records.
///
/// # Arguments
///
/// * `body` - Raw response bytes
/// * `limit` - Maximum number of records to keep, `0` for no limit
///
/// # Returns
///
/// Records in upstream order, ranked from 1. Rows without a repository name are
/// skipped. An empty vector is a valid result.
///
/// # Errors
///
/// Returns [`NormalizeError::InvalidJson`] if the body is not JSON and
/// [`NormalizeError::UnrecognizedShape`] if no known shape matches.
pub fn normalize(body: &[u8], limit: usize) -> Result<Vec<Repository>, NormalizeError> {
    let value: Value = serde_json::from_slice(body)?;
    let (shape, candidates) = decode(&value)?;

    let limit = if limit == 0 { usize::MAX } else { limit };
    let repositories: Vec<Repository> = candidates
        .into_iter()
        .filter(|candidate| {
            if candidate.full_name.is_empty() {
                debug!(shape = shape.as_str(), "Skipping row without repository name");
                return false;
            }
            true
        })
        .take(limit)
        .enumerate()
        .map(|(index, candidate)| candidate.into_repository(index + 1))
        .collect();

    debug!(
        shape = shape.as_str(),
        count = repositories.len(),
        "Normalized response"
    );
    Ok(repositories)
}

/// Runs the shape decoders in priority order.
fn decode(value: &Value) -> Result<(ResponseShape, Vec<Candidate>), NormalizeError> {
    // A bare `null` is an empty legacy result
    if value.is_null() {
        return Ok((ResponseShape::Legacy, Vec::new()));
    }
    if !value.is_object() {
        return Err(NormalizeError::UnrecognizedShape);
    }

    if let Some(candidates) = sql_endpoint::decode(value) {
        return Ok((ResponseShape::SqlEndpoint, candidates));
    }
    if let Some(candidates) = search::decode(value) {
        return Ok((ResponseShape::Search, candidates));
    }
    if let Some(candidates) = legacy::decode(value) {
        return Ok((ResponseShape::Legacy, candidates));
    }

    Err(NormalizeError::UnrecognizedShape)
}

/// Deserializes a value, mapping JSON `null` to the type's default.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
