//! Handlebars-backed report renderer.

use super::display::{display_language, display_period, escape_html, format_number};
use super::{ReportContext, ReportError, ReportFormat};
use crate::repository::{github_url, Repository};
use handlebars::{no_escape, Handlebars};
use serde::Serialize;
use serde_json::{json, Value};
use std::borrow::Cow;
use url::Url;

const TEXT_TEMPLATE: &str = include_str!("templates/report.txt.hbs");
const HTML_TEMPLATE: &str = include_str!("templates/report.html.hbs");

/// Heading used by both report formats.
pub const REPORT_TITLE: &str = "GitHub Trending Repositories Report";

/// Creates a strict Handlebars registry with the given escape function.
fn create_registry(escape: fn(&str) -> String) -> Handlebars<'static> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(escape);

    // Catch template typos instead of rendering blanks
    hbs.set_strict_mode(true);

    hbs
}

/// One repository as seen by the templates.
#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    rank: usize,
    full_name: &'a str,
    url: Cow<'a, str>,
    description: &'a str,
    language: &'a str,
    stars: u64,
    forks: u64,
    stars_delta: u64,
    forks_delta: u64,
    stars_formatted: String,
    forks_formatted: String,
    stars_delta_formatted: String,
    forks_delta_formatted: String,
}

impl<'a> From<&'a Repository> for ReportRow<'a> {
    fn from(repo: &'a Repository) -> Self {
        Self {
            rank: repo.rank,
            full_name: &repo.full_name,
            url: link_url(repo),
            description: &repo.description,
            language: &repo.language,
            stars: repo.stars,
            forks: repo.forks,
            stars_delta: repo.stars_delta,
            forks_delta: repo.forks_delta,
            stars_formatted: format_number(repo.stars),
            forks_formatted: format_number(repo.forks),
            stars_delta_formatted: format_number(repo.stars_delta),
            forks_delta_formatted: format_number(repo.forks_delta),
        }
    }
}

/// Returns the repository URL if it is an `http(s)` link, else the GitHub URL
/// built from the full name.
fn link_url(repo: &Repository) -> Cow<'_, str> {
    match Url::parse(&repo.url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Cow::Borrowed(&repo.url),
        _ => Cow::Owned(github_url(&repo.full_name)),
    }
}

/// Renders repository reports and subject lines.
///
/// The text registry writes values verbatim; the HTML registry escapes every
/// interpolated value with [`escape_html`].
pub struct ReportRenderer {
    text: Handlebars<'static>,
    html: Handlebars<'static>,
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer {
    /// Creates a new report renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            text: create_registry(no_escape),
            html: create_registry(escape_html),
        }
    }

    /// Renders a report for `repositories` in the requested format.
    ///
    /// Repositories are listed in the order given; an empty slice yields a
    /// report with a zero total.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render(
        &self,
        repositories: &[Repository],
        context: &ReportContext,
        format: ReportFormat,
    ) -> Result<String, ReportError> {
        let rows: Vec<ReportRow<'_>> = repositories.iter().map(ReportRow::from).collect();
        let data = json!({
            "title": REPORT_TITLE,
            "language": display_language(&context.language),
            "period": display_period(&context.period),
            "generated": context.generated_at_display(),
            "total": repositories.len(),
            "repositories": rows,
        });

        match format {
            ReportFormat::Text => Self::render_template(&self.text, TEXT_TEMPLATE, &data),
            ReportFormat::Html => Self::render_template(&self.html, HTML_TEMPLATE, &data),
        }
    }

    /// Renders an email subject line.
    ///
    /// The template may reference `{{language}}`, `{{period}}` and `{{count}}`,
    /// all in display form. A subject without placeholders is returned as is.
    ///
    /// # Errors
    ///
    /// Returns an error if the template references an unknown variable.
    pub fn render_subject(
        &self,
        template: &str,
        context: &ReportContext,
        count: usize,
    ) -> Result<String, ReportError> {
        let data = json!({
            "language": display_language(&context.language),
            "period": display_period(&context.period),
            "count": count,
        });

        Self::render_template(&self.text, template, &data)
    }

    /// Renders a template with the given data.
    fn render_template(
        registry: &Handlebars<'static>,
        template: &str,
        data: &Value,
    ) -> Result<String, ReportError> {
        Ok(registry.render_template(template, data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn context(language: &str, period: &str) -> ReportContext {
        let generated_at = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(8, 5, 7)
            .unwrap();
        ReportContext {
            language: language.to_string(),
            period: period.to_string(),
            generated_at,
        }
    }

    fn repository(rank: usize, full_name: &str) -> Repository {
        Repository {
            repo_id: rank as u64,
            full_name: full_name.to_string(),
            owner: crate::repository::owner_of(full_name).to_string(),
            description: String::new(),
            language: String::new(),
            stars: 1200,
            stars_delta: 0,
            forks: 30,
            forks_delta: 0,
            pushes: None,
            pull_requests: None,
            rank,
            url: crate::repository::github_url(full_name),
        }
    }

    #[test]
    fn text_report_lists_repositories_in_order() {
        let mut first = repository(1, "rust-lang/rust");
        first.description = "Empowering everyone".to_string();
        first.language = "Rust".to_string();
        let second = repository(2, "tokio-rs/tokio");

        let renderer = ReportRenderer::new();
        let out = renderer
            .render(&[first, second], &context("rust", "weekly"), ReportFormat::Text)
            .unwrap();

        assert!(out.starts_with("======================================\nGitHub Trending"));
        assert!(out.contains("Language: Rust\n"));
        assert!(out.contains("Period: Past Week\n"));
        assert!(out.contains("Generated: 2024-03-09 08:05:07\n"));
        assert!(out.contains("Total Repositories: 2\n"));
        assert!(out.contains("#1  rust-lang/rust\n    URL: https://github.com/rust-lang/rust\n"));
        assert!(out.contains("    Description: Empowering everyone\n"));
        assert!(out.contains("    Stars: 1200\n"));
        assert!(out.ends_with("Powered by GitHub API\n"));

        let first_pos = out.find("#1  rust-lang/rust").unwrap();
        let second_pos = out.find("#2  tokio-rs/tokio").unwrap();
        assert!(first_pos < second_pos);
    }

    #[test]
    fn text_report_omits_empty_optional_lines() {
        let renderer = ReportRenderer::new();
        let out = renderer
            .render(
                &[repository(1, "a/b")],
                &context("all", "daily"),
                ReportFormat::Text,
            )
            .unwrap();

        assert!(!out.contains("Description:"));
        assert!(!out.contains("    Language:"));
        assert!(out.contains("Language: All Languages\n"));
    }

    #[test]
    fn delta_suffix_only_when_positive() {
        let renderer = ReportRenderer::new();
        let ctx = context("all", "daily");

        let zero = renderer
            .render(&[repository(1, "a/b")], &ctx, ReportFormat::Text)
            .unwrap();
        assert!(!zero.contains("(+0)"));
        assert!(!zero.contains("(+"));

        let mut gaining = repository(1, "a/b");
        gaining.stars_delta = 5;
        let out = renderer.render(&[gaining], &ctx, ReportFormat::Text).unwrap();
        assert!(out.contains("    Stars: 1200 (+5)\n"));
        assert_eq!(out.matches("(+5)").count(), 1);
        assert!(out.contains("    Forks: 30\n"));
    }

    #[test]
    fn empty_text_report_states_zero_total() {
        let renderer = ReportRenderer::new();
        let out = renderer
            .render(&[], &context("all", "daily"), ReportFormat::Text)
            .unwrap();
        assert!(out.contains("Total Repositories: 0"));
        assert!(!out.contains('#'));
    }

    #[test]
    fn html_report_escapes_user_text() {
        let mut repo = repository(1, "evil/<script>");
        repo.description = "Tom & Jerry's \"best\" <b>tool</b>".to_string();
        repo.language = "C<++>".to_string();

        let renderer = ReportRenderer::new();
        let out = renderer
            .render(&[repo], &context("all", "daily"), ReportFormat::Html)
            .unwrap();

        assert!(!out.contains("<script>"));
        assert!(!out.contains("<b>tool</b>"));
        assert!(out.contains("evil/&lt;script&gt;"));
        assert!(out.contains("Tom &amp; Jerry&#39;s &quot;best&quot; &lt;b&gt;tool&lt;/b&gt;"));
        assert!(out.contains("<span class=\"language\">C&lt;++&gt;</span>"));
    }

    #[test]
    fn html_report_formats_numbers_and_placeholders() {
        let mut repo = repository(1, "a/b");
        repo.stars = 1234567;
        repo.stars_delta = 2500;

        let renderer = ReportRenderer::new();
        let out = renderer
            .render(&[repo], &context("all", "monthly"), ReportFormat::Html)
            .unwrap();

        assert!(out.starts_with("<!DOCTYPE html>"));
        assert!(out.contains("<td>1,234,567 <span class=\"stat-delta\">(+2,500)</span></td>"));
        assert!(out.contains("<td>30</td>"));
        assert!(out.contains("<td>-</td>"));
        assert!(out.contains("Past Month"));
        assert!(out.contains("<a href=\"https://github.com/a/b\" target=\"_blank\">a/b</a>"));
        assert!(!out.contains("<link"));
        assert!(!out.contains("<script"));
    }

    #[test]
    fn non_web_urls_link_to_github() {
        let mut script = repository(1, "a/b");
        script.url = "javascript:alert(1)".to_string();
        let mut relative = repository(2, "c/d");
        relative.url = "c/d".to_string();
        let mut mirror = repository(3, "e/f");
        mirror.url = "http://mirror.example.com/e/f".to_string();

        let renderer = ReportRenderer::new();
        let out = renderer
            .render(&[script, relative, mirror], &context("all", "daily"), ReportFormat::Html)
            .unwrap();

        assert!(!out.contains("javascript:"));
        assert!(out.contains("<a href=\"https://github.com/a/b\""));
        assert!(out.contains("<a href=\"https://github.com/c/d\""));
        assert!(out.contains("<a href=\"http://mirror.example.com/e/f\""));
    }

    #[test]
    fn uppercase_all_is_every_language() {
        let renderer = ReportRenderer::new();
        let out = renderer
            .render(&[], &context("ALL", "daily"), ReportFormat::Text)
            .unwrap();
        assert!(out.contains("Language: All Languages\n"));
    }

    #[test]
    fn empty_html_report_has_empty_body() {
        let renderer = ReportRenderer::new();
        let out = renderer
            .render(&[], &context("all", "daily"), ReportFormat::Html)
            .unwrap();

        let start = out.find("<tbody>").unwrap() + "<tbody>".len();
        let end = out.find("</tbody>").unwrap();
        assert!(out[start..end].trim().is_empty());
        assert!(out.contains("0 repositories"));
        assert!(out.trim_end().ends_with("</html>"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let mut repo = repository(1, "a/b");
        repo.description = "x & y".to_string();
        let repos = vec![repo, repository(2, "c/d")];
        let ctx = context("go", "daily");
        let renderer = ReportRenderer::new();

        for format in [ReportFormat::Text, ReportFormat::Html] {
            let first = renderer.render(&repos, &ctx, format).unwrap();
            let second = renderer.render(&repos, &ctx, format).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn renders_subject_placeholders() {
        let renderer = ReportRenderer::new();
        let ctx = context("rust", "weekly");

        let subject = renderer
            .render_subject("Trending {{language}} ({{period}}): {{count}} repos", &ctx, 7)
            .unwrap();
        assert_eq!(subject, "Trending Rust (Past Week): 7 repos");

        let plain = renderer
            .render_subject("GitHub Trending Repositories Report", &ctx, 7)
            .unwrap();
        assert_eq!(plain, "GitHub Trending Repositories Report");
    }

    #[test]
    fn subject_with_unknown_placeholder_fails() {
        let renderer = ReportRenderer::new();
        let result = renderer.render_subject("{{owner}}", &context("all", "daily"), 1);
        assert!(result.is_err());
    }
}
