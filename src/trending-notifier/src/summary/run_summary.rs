//! Run summary types.

use crate::fetch::{ApiSource, Period};
use crate::report::ReportFormat;

/// Summary of a complete run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Upstream that was queried.
    pub source: ApiSource,

    /// Language filter of the query.
    pub language: String,

    /// Period of the query.
    pub period: Period,

    /// Number of repositories in the report.
    pub repositories: usize,

    /// Format the report was rendered in.
    pub format: ReportFormat,

    /// Rendered subject line.
    pub subject: String,

    /// Number of recipients the report was addressed to.
    pub recipients: usize,

    /// Whether this was a dry run.
    pub dry_run: bool,

    /// Whether the report was handed to the mail server.
    pub delivered: bool,
}

impl RunSummary {
    /// Returns a human readable name for the run mode.
    #[must_use]
    pub fn mode(&self) -> &'static str {
        if self.dry_run {
            "Dry Run"
        } else {
            "Live"
        }
    }

    /// Returns true if the run did what its mode promised.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.dry_run || self.delivered
    }
}
