//! Orchestrates a single fetch, format and send run.

mod error;

pub use error::RunnerError;

use crate::config::Config;
use crate::fetch::{Fetcher, HttpFetcher, TrendingQuery};
use crate::mail::{self, MailMessage, Mailer, SmtpMailer};
use crate::normalize::normalize_response;
use crate::report::{ReportContext, ReportFormat, ReportRenderer};
use crate::summary::RunSummary;
use chrono::{Local, NaiveDateTime};
use tracing::{info, info_span, Instrument};

/// Runs the notifier pipeline once.
///
/// Every stage is attempted exactly once; the first failure ends the run.
pub struct Runner {
    config: Config,
    dry_run: bool,
    fetcher: Box<dyn Fetcher>,
    mailer: Option<Box<dyn Mailer>>,
    renderer: ReportRenderer,
}

impl Runner {
    /// Builds a runner with the HTTP fetcher and, for live runs, the SMTP
    /// mailer.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the email settings are incomplete for a
    /// live run, or if a client cannot be built.
    pub fn new(config: Config, dry_run: bool) -> Result<Self, RunnerError> {
        let fetcher = HttpFetcher::new(&config.api)?;

        let mailer: Option<Box<dyn Mailer>> = if dry_run {
            None
        } else {
            config.email.validate()?;
            Some(Box::new(SmtpMailer::new(&config.email)?))
        };

        Ok(Self::with_parts(config, dry_run, Box::new(fetcher), mailer))
    }

    /// Builds a runner from explicit collaborators.
    #[must_use]
    pub fn with_parts(
        config: Config,
        dry_run: bool,
        fetcher: Box<dyn Fetcher>,
        mailer: Option<Box<dyn Mailer>>,
    ) -> Self {
        Self {
            config,
            dry_run,
            fetcher,
            mailer,
            renderer: ReportRenderer::new(),
        }
    }

    /// Executes the full pipeline, stamping the report with the local time.
    ///
    /// # Errors
    ///
    /// Returns the first [`RunnerError`] raised by any stage.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        self.run_at(Local::now().naive_local()).await
    }

    /// Executes the full pipeline with a fixed generation time.
    ///
    /// # Errors
    ///
    /// Returns the first [`RunnerError`] raised by any stage.
    pub async fn run_at(&self, generated_at: NaiveDateTime) -> Result<RunSummary, RunnerError> {
        let query = self.config.trending_query()?;
        let span = info_span!(
            "run",
            source = self.config.api.source.as_str(),
            language = %query.language,
            period = query.period.as_str(),
            dry_run = self.dry_run,
        );

        self.execute(query, generated_at).instrument(span).await
    }

    async fn execute(
        &self,
        query: TrendingQuery,
        generated_at: NaiveDateTime,
    ) -> Result<RunSummary, RunnerError> {
        info!(limit = query.limit, "Fetching trending repositories");
        let response = self.fetcher.fetch(&query).await?;

        let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);
        let repositories = normalize_response(&response, limit)?;
        if repositories.is_empty() {
            return Err(RunnerError::EmptyResult {
                language: query.language,
                period: query.period.as_str().to_string(),
            });
        }
        info!(count = repositories.len(), "Normalized repositories");

        let context = ReportContext {
            language: query.language.clone(),
            period: query.period.as_str().to_string(),
            generated_at,
        };
        let format = ReportFormat::from_html_flag(self.config.email.use_html);
        let body = self.renderer.render(&repositories, &context, format)?;
        let subject = self.renderer.render_subject(
            &self.config.email.subject,
            &context,
            repositories.len(),
        )?;

        let mut summary = RunSummary {
            source: self.config.api.source,
            language: query.language,
            period: query.period,
            repositories: repositories.len(),
            format,
            subject,
            recipients: self.config.email.to.len(),
            dry_run: self.dry_run,
            delivered: false,
        };

        if self.dry_run {
            print_dry_run_preview(&summary, &body);
            return Ok(summary);
        }

        let mailer = self.mailer.as_ref().ok_or(RunnerError::NoMailer)?;
        let message = MailMessage {
            to: self.config.email.to.clone(),
            subject: summary.subject.clone(),
            body,
            is_html: format.is_html(),
        };
        mailer.send(&message).await?;
        summary.delivered = true;

        Ok(summary)
    }

    /// Sends the SMTP configuration test message, or prints it on a dry run.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if delivery fails.
    pub async fn send_test_email(&self) -> Result<MailMessage, RunnerError> {
        if self.dry_run {
            let message = mail::test_message(
                self.config.email.to.clone(),
                Local::now().naive_local(),
                0,
            );
            println!("\n[DRY RUN] Test email to {:?}", message.to);
            println!("  Subject: {}", message.subject);
            println!("  {}\n", message.body);
            return Ok(message);
        }

        let mailer = self.mailer.as_ref().ok_or(RunnerError::NoMailer)?;
        Ok(mail::send_test_message(&**mailer, &self.config.email).await?)
    }
}

fn print_dry_run_preview(summary: &RunSummary, body: &str) {
    println!("\n[DRY RUN] Report ({})", summary.format.as_str());
    println!("  Subject: {}", summary.subject);
    println!("  Would send to {} recipient(s)\n", summary.recipients);
    println!("{body}");
}
