#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod fetch;
pub mod lock;
pub mod mail;
pub mod normalize;
pub mod report;
pub mod repository;
pub mod runner;
pub mod summary;

pub use config::{Config, ConfigError};
pub use fetch::{ApiSource, FetchError, Fetcher, HttpFetcher, Period, RawResponse, TrendingQuery};
pub use lock::{LockError, RunLock, DEFAULT_LOCK_NAME};
pub use mail::{send_test_message, MailError, MailMessage, Mailer, SmtpMailer};
pub use normalize::{normalize, normalize_response, NormalizeError, ResponseShape};
pub use report::{
    display_language, display_period, escape_html, format_number, format_report, ReportContext,
    ReportError, ReportFormat, ReportRenderer,
};
pub use repository::Repository;
pub use runner::{Runner, RunnerError};
pub use summary::RunSummary;
