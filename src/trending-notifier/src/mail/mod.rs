//! Email delivery over SMTP.

mod error;

pub use error::MailError;

use crate::config::EmailConfig;
use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

/// Port on which the SMTP server expects implicit TLS.
pub const IMPLICIT_TLS_PORT: u16 = 465;

/// Subject of the SMTP configuration test message.
pub const TEST_SUBJECT: &str = "SMTP Configuration Test";

/// A message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    /// Recipient addresses.
    pub to: Vec<String>,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
    /// Whether `body` is HTML.
    pub is_html: bool,
}

/// Delivers mail messages.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends a single message. No retries.
    ///
    /// # Errors
    ///
    /// Returns [`MailError`] if the message is invalid or delivery fails.
    async fn send(&self, message: &MailMessage) -> Result<(), MailError>;
}

/// Parses an address into a [`Mailbox`].
fn mailbox(address: &str) -> Result<Mailbox, MailError> {
    address.trim().parse().map_err(|source| MailError::Address {
        address: address.to_string(),
        source,
    })
}

/// Builds a MIME message from `from` and a [`MailMessage`].
///
/// # Errors
///
/// Returns [`MailError::NoRecipients`] when `to` is empty, or an address or
/// build error if the message is malformed.
pub fn build_message(from: &Mailbox, message: &MailMessage) -> Result<Message, MailError> {
    if message.to.is_empty() {
        return Err(MailError::NoRecipients);
    }

    let mut builder = Message::builder()
        .from(from.clone())
        .subject(message.subject.as_str());
    for recipient in &message.to {
        builder = builder.to(mailbox(recipient)?);
    }

    let content_type = if message.is_html {
        ContentType::TEXT_HTML
    } else {
        ContentType::TEXT_PLAIN
    };

    Ok(builder.header(content_type).body(message.body.clone())?)
}

/// SMTP mailer backed by `lettre`'s Tokio transport.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Builds a mailer from the email configuration.
    ///
    /// Port 465 uses implicit TLS; every other port upgrades with STARTTLS.
    ///
    /// # Errors
    ///
    /// Returns [`MailError`] if the sender address is invalid or the
    /// transport cannot be configured.
    pub fn new(config: &EmailConfig) -> Result<Self, MailError> {
        let from = mailbox(&config.from)?;

        let builder = if config.smtp_port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
        }
        .map_err(|source| MailError::Transport {
            host: config.smtp_host.clone(),
            source,
        })?;

        let transport = builder
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        debug!(
            host = %config.smtp_host,
            port = config.smtp_port,
            "SMTP transport configured"
        );

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        let email = build_message(&self.from, message)?;

        self.transport
            .send(email)
            .await
            .map_err(MailError::Delivery)?;

        info!(
            recipients = message.to.len(),
            subject = %message.subject,
            "Email sent"
        );
        Ok(())
    }
}

/// Builds the SMTP configuration test message.
#[must_use]
pub fn test_message(to: Vec<String>, sent_at: NaiveDateTime, run_id: i64) -> MailMessage {
    let body = format!(
        "<h1>Test succeeded!</h1>\
         <p>Your SMTP configuration is correct.</p>\
         <p>Sent at: {}</p>\
         <p>Run ID: {run_id}</p>",
        sent_at.format(crate::report::GENERATED_AT_FORMAT)
    );

    MailMessage {
        to,
        subject: TEST_SUBJECT.to_string(),
        body,
        is_html: true,
    }
}

/// Sends the SMTP configuration test message to the configured recipients.
///
/// # Errors
///
/// Returns [`MailError`] if delivery fails.
pub async fn send_test_message(
    mailer: &dyn Mailer,
    config: &EmailConfig,
) -> Result<MailMessage, MailError> {
    let now = Local::now();
    let run_id = now.timestamp_nanos_opt().unwrap_or_default();
    let message = test_message(config.to.clone(), now.naive_local(), run_id);

    info!(run_id, recipients = message.to.len(), "Sending test email");
    mailer.send(&message).await?;
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    fn sender() -> Mailbox {
        "bot@example.com".parse().unwrap()
    }

    fn message(to: &[&str], is_html: bool) -> MailMessage {
        MailMessage {
            to: to.iter().map(|s| (*s).to_string()).collect(),
            subject: "Trending".to_string(),
            body: "<p>hello</p>".to_string(),
            is_html,
        }
    }

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<MailMessage>>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
            self.sent.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    #[test]
    fn rejects_empty_recipient_list() {
        let result = build_message(&sender(), &message(&[], false));
        assert!(matches!(result, Err(MailError::NoRecipients)));
    }

    #[test]
    fn rejects_invalid_recipient() {
        let result = build_message(&sender(), &message(&["not an address"], false));
        assert!(matches!(result, Err(MailError::Address { .. })));
    }

    #[test]
    fn sets_headers_and_content_type() {
        let email = build_message(
            &sender(),
            &message(&["a@example.com", "b@example.com"], true),
        )
        .unwrap();
        let raw = String::from_utf8(email.formatted()).unwrap();

        assert!(raw.contains("From: bot@example.com"));
        assert!(raw.contains("a@example.com"));
        assert!(raw.contains("b@example.com"));
        assert!(raw.contains("Subject: Trending"));
        assert!(raw.contains("Content-Type: text/html; charset=utf-8"));
    }

    #[test]
    fn plain_text_content_type() {
        let email = build_message(&sender(), &message(&["a@example.com"], false)).unwrap();
        let raw = String::from_utf8(email.formatted()).unwrap();
        assert!(raw.contains("Content-Type: text/plain; charset=utf-8"));
    }

    #[test]
    fn test_message_carries_timestamp_and_run_id() {
        let sent_at = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        let msg = test_message(vec!["a@example.com".to_string()], sent_at, 42);

        assert!(msg.is_html);
        assert_eq!(msg.subject, TEST_SUBJECT);
        assert!(msg.body.contains("Sent at: 2024-01-02 03:04:05"));
        assert!(msg.body.contains("Run ID: 42"));
    }

    #[tokio::test]
    async fn send_test_message_uses_configured_recipients() {
        let mailer = RecordingMailer::default();
        let config = EmailConfig {
            to: vec!["team@example.com".to_string()],
            ..EmailConfig::default()
        };

        let sent = send_test_message(&mailer, &config).await.unwrap();

        let recorded = mailer.sent.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0], sent);
        assert_eq!(recorded[0].to, vec!["team@example.com".to_string()]);
    }
}
