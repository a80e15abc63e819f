//! Report formatting.
//!
//! Turns an ordered list of [`Repository`] records into either a plain-text
//! or a self-contained HTML report. Both formats carry the same metadata
//! block: language and period in display form, the generation time and the
//! total count.

mod display;
mod error;
mod renderer;

pub use display::{display_language, display_period, escape_html, format_number};
pub use error::ReportError;
pub use renderer::{ReportRenderer, REPORT_TITLE};

use crate::repository::Repository;
use chrono::{Local, NaiveDateTime};

/// Timestamp layout embedded in reports.
pub const GENERATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Output representation of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Plain text, suitable for terminals and text email bodies.
    Text,
    /// Complete HTML document with inline styling.
    Html,
}

impl ReportFormat {
    /// Picks the format matching the `use-html` email setting.
    #[must_use]
    pub const fn from_html_flag(use_html: bool) -> Self {
        if use_html {
            Self::Html
        } else {
            Self::Text
        }
    }

    /// Returns the lowercase name of the format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Html => "html",
        }
    }

    /// Returns `true` for [`ReportFormat::Html`].
    #[must_use]
    pub const fn is_html(self) -> bool {
        matches!(self, Self::Html)
    }
}

/// Query metadata shown in the report header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportContext {
    /// Language filter as configured (`all` or a language name).
    pub language: String,
    /// Period token as configured (`daily`, `weekly`, `monthly`).
    pub period: String,
    /// Generation time in the local clock.
    pub generated_at: NaiveDateTime,
}

impl ReportContext {
    /// Creates a context stamped with the current local time.
    #[must_use]
    pub fn now(language: impl Into<String>, period: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            period: period.into(),
            generated_at: Local::now().naive_local(),
        }
    }

    /// Returns the generation time as `YYYY-MM-DD HH:MM:SS`.
    #[must_use]
    pub fn generated_at_display(&self) -> String {
        self.generated_at.format(GENERATED_AT_FORMAT).to_string()
    }
}

/// Formats a report with a fresh [`ReportRenderer`].
///
/// # Errors
///
/// Returns an error if template rendering fails.
pub fn format_report(
    repositories: &[Repository],
    context: &ReportContext,
    format: ReportFormat,
) -> Result<String, ReportError> {
    ReportRenderer::new().render(repositories, context, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn format_follows_html_flag() {
        assert_eq!(ReportFormat::from_html_flag(true), ReportFormat::Html);
        assert_eq!(ReportFormat::from_html_flag(false), ReportFormat::Text);
        assert!(ReportFormat::Html.is_html());
        assert_eq!(ReportFormat::Text.as_str(), "text");
    }

    #[test]
    fn generated_at_uses_fixed_layout() {
        let ctx = ReportContext {
            language: "all".to_string(),
            period: "daily".to_string(),
            generated_at: NaiveDate::from_ymd_opt(2025, 12, 31)
                .unwrap()
                .and_hms_opt(23, 59, 1)
                .unwrap(),
        };
        assert_eq!(ctx.generated_at_display(), "2025-12-31 23:59:01");
    }

    #[test]
    fn now_keeps_query_metadata() {
        let ctx = ReportContext::now("rust", "weekly");
        assert_eq!(ctx.language, "rust");
        assert_eq!(ctx.period, "weekly");
        assert_eq!(ctx.generated_at_display().len(), 19);
    }

    #[test]
    fn format_report_renders_empty_input() {
        let ctx = ReportContext::now("all", "daily");
        let text = format_report(&[], &ctx, ReportFormat::Text).unwrap();
        assert!(text.contains("Total Repositories: 0"));
    }
}
