//! Response normalization error types.

use thiserror::Error;

/// Errors that can occur while turning an upstream response into records.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// Upstream answered with a non-success status.
    #[error("Upstream returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// The body is not valid JSON.
    #[error("Failed to parse response: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The body is JSON but matches none of the known response shapes.
    #[error("Response did not match any known trending response shape")]
    UnrecognizedShape,
}

impl NormalizeError {
    /// Returns true if the body itself could not be understood.
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::InvalidJson(_) | Self::UnrecognizedShape)
    }
}
