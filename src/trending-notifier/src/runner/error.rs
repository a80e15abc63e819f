//! Runner error types.

/// Errors that can occur while running the notifier.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration loading or validation errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Another run holds the lock.
    #[error(transparent)]
    Lock(#[from] crate::lock::LockError),

    /// The upstream request could not be completed.
    #[error(transparent)]
    Fetch(#[from] crate::fetch::FetchError),

    /// The upstream response could not be interpreted.
    #[error(transparent)]
    Normalize(#[from] crate::normalize::NormalizeError),

    /// The upstream returned no repositories.
    #[error("No trending repositories found (language: {language}, period: {period})")]
    EmptyResult { language: String, period: String },

    /// The report could not be rendered.
    #[error(transparent)]
    Report(#[from] crate::report::ReportError),

    /// The report could not be delivered.
    #[error(transparent)]
    Mail(#[from] crate::mail::MailError),

    /// A live run was started without a mailer.
    #[error("No mailer configured for a live run")]
    NoMailer,
}

impl RunnerError {
    /// Returns true for failures that happen before any upstream request.
    #[must_use]
    pub fn is_setup_error(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Lock(_))
    }
}
