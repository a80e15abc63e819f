//! Environment variable overrides.

use super::Config;
use crate::fetch::ApiSource;
use std::str::FromStr;
use tracing::warn;

/// Reads a non-empty environment variable.
fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

/// Reads and parses a numeric environment variable, ignoring bad values.
fn parsed<T: FromStr>(name: &str) -> Option<T> {
    let raw = var(name)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(variable = name, value = %raw, "Ignoring unparseable environment override");
            None
        }
    }
}

/// Splits a comma separated recipient list, dropping empty entries.
pub(super) fn split_recipients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Applies environment overrides on top of file and default values.
pub(super) fn apply_overrides(config: &mut Config) {
    if let Some(v) = var("API_SOURCE") {
        match ApiSource::from_name(&v) {
            Some(source) => config.api.source = source,
            None => warn!(value = %v, "Ignoring unknown API_SOURCE"),
        }
    }
    if let Some(v) = var("API_BASE_URL") {
        config.api.base_url = v;
    }
    if let Some(v) = parsed("API_TIMEOUT") {
        config.api.timeout_secs = v;
    }
    if let Some(v) = var("GITHUB_TOKEN") {
        config.api.github_token = Some(v);
    }

    if let Some(v) = var("SMTP_HOST") {
        config.email.smtp_host = v;
    }
    if let Some(v) = parsed("SMTP_PORT") {
        config.email.smtp_port = v;
    }
    if let Some(v) = var("SMTP_USERNAME") {
        config.email.username = v;
    }
    if let Some(v) = var("SMTP_PASSWORD") {
        config.email.password = v;
    }
    if let Some(v) = var("EMAIL_FROM") {
        config.email.from = v;
    }
    if let Some(v) = var("EMAIL_TO") {
        config.email.to = split_recipients(&v);
    }
    if let Some(v) = var("EMAIL_SUBJECT") {
        config.email.subject = v;
    }
    if let Some(v) = var("EMAIL_USE_HTML") {
        config.email.use_html = v == "true" || v == "1";
    }

    if let Some(v) = var("QUERY_LANGUAGE") {
        config.query.language = v;
    }
    if let Some(v) = var("QUERY_PERIOD") {
        config.query.period = v;
    }
    if let Some(v) = parsed("QUERY_LIMIT") {
        config.query.limit = v;
    }
}
