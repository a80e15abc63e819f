//! Notifier configuration.
//!
//! Configuration is resolved in three layers: built-in defaults, an optional
//! TOML file, then environment variables. The result is validated before use.
//!
//! ```toml
//! [api]
//! source = "ossinsight"
//! timeout-secs = 30
//!
//! [email]
//! smtp-host = "smtp.example.com"
//! username = "bot"
//! password = "secret"
//! from = "bot@example.com"
//! to = ["team@example.com"]
//!
//! [query]
//! language = "rust"
//! period = "weekly"
//! limit = 25
//! ```

mod env;
mod error;
mod sections;

pub use error::ConfigError;
pub use sections::{
    ApiConfig, EmailConfig, QueryConfig, DEFAULT_BASE_URL, DEFAULT_GITHUB_BASE_URL,
    DEFAULT_SUBJECT,
};

use crate::fetch::{Period, TrendingQuery};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};
use url::Url;

/// Largest number of repositories a single report may contain.
pub const MAX_LIMIT: u32 = 100;

/// Complete notifier configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
    /// Upstream API settings.
    pub api: ApiConfig,
    /// SMTP and message settings.
    pub email: EmailConfig,
    /// Trending query settings.
    pub query: QueryConfig,
}

impl Config {
    /// Loads configuration from defaults, an optional file and the environment.
    ///
    /// The API and query sections are validated here. Email settings are only
    /// needed when a report is actually sent; see [`EmailConfig::validate`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing or malformed, or if a
    /// setting is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        env::apply_overrides(&mut config);
        config.validate()?;

        info!(
            source = config.api.source.as_str(),
            language = %config.query.language,
            period = %config.query.period,
            limit = config.query.limit,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Parses a TOML config file without applying overrides or validation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Reading config file");

        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::TomlError {
            path: path.display().to_string(),
            source,
        })
    }

    /// Validates the API and query sections.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for the first invalid setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("api.base-url", &self.api.base_url),
            ("api.github-base-url", &self.api.github_base_url),
        ] {
            if Url::parse(value).is_err() {
                return Err(ConfigError::invalid(
                    field,
                    format!("not a valid URL: {value}"),
                ));
            }
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "api.timeout-secs",
                "must be greater than zero",
            ));
        }

        self.trending_query().map(|_| ())
    }

    /// Builds the trending query described by the `[query]` section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if the period is unknown or the
    /// limit is outside 1-100.
    pub fn trending_query(&self) -> Result<TrendingQuery, ConfigError> {
        let period = Period::from_token(&self.query.period).ok_or_else(|| {
            ConfigError::invalid(
                "query.period",
                format!(
                    "unknown period '{}' (must be daily, weekly, or monthly)",
                    self.query.period
                ),
            )
        })?;

        if self.query.limit == 0 || self.query.limit > MAX_LIMIT {
            return Err(ConfigError::invalid(
                "query.limit",
                format!("must be between 1 and {MAX_LIMIT}"),
            ));
        }

        Ok(TrendingQuery {
            language: self.query.language.clone(),
            period,
            limit: self.query.limit,
        })
    }
}

impl EmailConfig {
    /// Validates the settings needed to deliver a report.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for the first missing setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("email.smtp-host", &self.smtp_host),
            ("email.username", &self.username),
            ("email.password", &self.password),
            ("email.from", &self.from),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::invalid(field, "is required"));
            }
        }

        if self.to.iter().all(|recipient| recipient.trim().is_empty()) {
            return Err(ConfigError::invalid(
                "email.to",
                "at least one recipient is required",
            ));
        }

        Ok(())
    }
}

/// Environment variables consulted by [`Config::load`].
pub const OVERRIDE_VARIABLES: [&str; 15] = [
    "API_SOURCE",
    "API_BASE_URL",
    "API_TIMEOUT",
    "GITHUB_TOKEN",
    "SMTP_HOST",
    "SMTP_PORT",
    "SMTP_USERNAME",
    "SMTP_PASSWORD",
    "EMAIL_FROM",
    "EMAIL_TO",
    "EMAIL_SUBJECT",
    "EMAIL_USE_HTML",
    "QUERY_LANGUAGE",
    "QUERY_PERIOD",
    "QUERY_LIMIT",
];
