//! Trending query parameters and their upstream spellings.

use chrono::{Days, NaiveDate};
use serde::Deserialize;

/// Time window for trending data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// Past 24 hours.
    Daily,
    /// Past week.
    Weekly,
    /// Past month.
    Monthly,
}

impl Period {
    /// Parses a period token, accepting the historical synonyms.
    ///
    /// Returns `None` for unknown tokens.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "daily" | "past_day" | "past_24_hours" => Some(Self::Daily),
            "weekly" | "past_week" | "past_7_days" => Some(Self::Weekly),
            "monthly" | "past_month" | "past_28_days" => Some(Self::Monthly),
            _ => None,
        }
    }

    /// Returns the canonical token (`daily`, `weekly` or `monthly`).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Returns the OSS Insight `period` parameter value.
    #[must_use]
    pub fn ossinsight_param(&self) -> &'static str {
        match self {
            Self::Daily => "past_24_hours",
            Self::Weekly => "past_week",
            Self::Monthly => "past_month",
        }
    }

    /// Returns the look-back window in days used for GitHub search.
    #[must_use]
    pub fn days(&self) -> u64 {
        match self {
            Self::Daily => 1,
            Self::Weekly => 7,
            Self::Monthly => 30,
        }
    }
}

/// Upstream API used to fetch trending repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApiSource {
    /// OSS Insight trends API.
    #[default]
    Ossinsight,
    /// GitHub repository search, sorted by stars.
    GithubSearch,
}

impl ApiSource {
    /// Parses a source name as written in config or the environment.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "ossinsight" | "oss-insight" => Some(Self::Ossinsight),
            "github-search" | "github_search" | "github" => Some(Self::GithubSearch),
            _ => None,
        }
    }

    /// Returns the source name for logging.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ossinsight => "ossinsight",
            Self::GithubSearch => "github-search",
        }
    }
}

/// Parameters for a single trending fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendingQuery {
    /// Language filter; `all` or empty for every language.
    pub language: String,
    /// Time window.
    pub period: Period,
    /// Maximum number of repositories wanted.
    pub limit: u32,
}

impl TrendingQuery {
    /// Returns true if the query is not filtered by language.
    #[must_use]
    pub fn all_languages(&self) -> bool {
        is_all_languages(&self.language)
    }
}

/// Returns true for the "every language" sentinel.
fn is_all_languages(language: &str) -> bool {
    language.is_empty() || language.eq_ignore_ascii_case("all")
}

/// Converts a language into the capitalization OSS Insight expects.
///
/// `go` becomes `Go`; names with irregular casing come from a fixed table.
#[must_use]
pub fn ossinsight_language(language: &str) -> String {
    if is_all_languages(language) {
        return "All".to_string();
    }

    let lower = language.to_lowercase();
    let canonical = match lower.as_str() {
        "javascript" => Some("JavaScript"),
        "typescript" => Some("TypeScript"),
        "c++" => Some("C++"),
        "c#" => Some("C#"),
        "php" => Some("PHP"),
        "html" => Some("HTML"),
        "css" => Some("CSS"),
        "plpgsql" => Some("PLpgSQL"),
        "tsql" => Some("TSQL"),
        "hcl" => Some("HCL"),
        "cmake" => Some("CMake"),
        "powershell" => Some("PowerShell"),
        "matlab" => Some("MATLAB"),
        "objective-c" => Some("Objective-C"),
        _ => None,
    };
    if let Some(canonical) = canonical {
        return canonical.to_string();
    }

    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Builds the `q` parameter for a GitHub repository search.
///
/// Repositories created within the period are searched, optionally filtered
/// by language.
#[must_use]
pub fn github_search_query(query: &TrendingQuery, today: NaiveDate) -> String {
    let since = today
        .checked_sub_days(Days::new(query.period.days()))
        .unwrap_or(today);
    let mut q = format!("created:>{}", since.format("%Y-%m-%d"));
    if !query.all_languages() {
        q.push_str(" language:");
        q.push_str(&query.language.to_lowercase());
    }
    q
}
