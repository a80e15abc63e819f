//! Mail delivery error types.

use thiserror::Error;

/// Errors that can occur while building or delivering a message.
#[derive(Debug, Error)]
pub enum MailError {
    /// The message has no recipients.
    #[error("No recipients specified")]
    NoRecipients,

    /// An address could not be parsed.
    #[error("Invalid email address '{address}': {source}")]
    Address {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },

    /// The message could not be assembled.
    #[error("Failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    /// The SMTP transport could not be configured.
    #[error("Failed to configure SMTP transport for '{host}': {source}")]
    Transport {
        host: String,
        #[source]
        source: lettre::transport::smtp::Error,
    },

    /// The SMTP server rejected or failed the delivery.
    #[error("Failed to send email: {0}")]
    Delivery(#[source] lettre::transport::smtp::Error),
}
