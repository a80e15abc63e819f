//! Configuration sections deserialized from the config file.

use crate::fetch::ApiSource;
use serde::Deserialize;

/// Default OSS Insight API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.ossinsight.io";

/// Default GitHub REST API base URL.
pub const DEFAULT_GITHUB_BASE_URL: &str = "https://api.github.com";

/// Default email subject.
pub const DEFAULT_SUBJECT: &str = "GitHub Trending Repositories Report";

/// Upstream API settings (`[api]`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Which upstream to query.
    pub source: ApiSource,

    /// OSS Insight base URL.
    pub base_url: String,

    /// GitHub REST API base URL, used by the search source.
    pub github_base_url: String,

    /// Optional GitHub token, used by the search source.
    pub github_token: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            source: ApiSource::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            github_base_url: DEFAULT_GITHUB_BASE_URL.to_string(),
            github_token: None,
            timeout_secs: 30,
        }
    }
}

/// SMTP and message settings (`[email]`).
#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct EmailConfig {
    /// SMTP server host.
    pub smtp_host: String,

    /// SMTP server port. 465 uses implicit TLS, anything else STARTTLS.
    pub smtp_port: u16,

    /// SMTP username.
    pub username: String,

    /// SMTP password.
    pub password: String,

    /// Sender address.
    pub from: String,

    /// Recipient addresses.
    pub to: Vec<String>,

    /// Subject line; may use `{{language}}`, `{{period}}` and `{{count}}`.
    pub subject: String,

    /// Send the HTML report instead of plain text.
    pub use_html: bool,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: String::new(),
            smtp_port: 587,
            username: String::new(),
            password: String::new(),
            from: String::new(),
            to: Vec::new(),
            subject: DEFAULT_SUBJECT.to_string(),
            use_html: true,
        }
    }
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("subject", &self.subject)
            .field("use_html", &self.use_html)
            .finish()
    }
}

/// Trending query settings (`[query]`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct QueryConfig {
    /// Language filter, `all` for every language.
    pub language: String,

    /// Period token: `daily`, `weekly`, `monthly` or a synonym.
    pub period: String,

    /// Number of repositories to report (1-100).
    pub limit: u32,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            language: "all".to_string(),
            period: "daily".to_string(),
            limit: 100,
        }
    }
}
