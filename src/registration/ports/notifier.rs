//! Notifier port for outbound registration messages.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Result type for notifier operations.
pub type NotifierResult<T> = Result<T, NotifierError>;

/// A composed outbound message.
///
/// The HTML body, when present, is an alternative representation of the
/// same message, not a second message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    to: Vec<String>,
    from: String,
    subject: String,
    text_body: String,
    html_body: Option<String>,
}

impl EmailMessage {
    /// Creates a plain-text message with no recipients yet.
    #[must_use]
    pub const fn new(from: String, subject: String, text_body: String) -> Self {
        Self {
            to: Vec::new(),
            from,
            subject,
            text_body,
            html_body: None,
        }
    }

    /// Adds a recipient address.
    #[must_use]
    pub fn with_recipient(mut self, address: impl Into<String>) -> Self {
        self.to.push(address.into());
        self
    }

    /// Adds several recipient addresses.
    #[must_use]
    pub fn with_recipients(mut self, addresses: impl IntoIterator<Item = String>) -> Self {
        self.to.extend(addresses);
        self
    }

    /// Attaches an HTML alternative body.
    #[must_use]
    pub fn with_html_body(mut self, html_body: impl Into<String>) -> Self {
        self.html_body = Some(html_body.into());
        self
    }

    /// Returns the recipient addresses.
    #[must_use]
    pub fn to(&self) -> &[String] {
        &self.to
    }

    /// Returns the sender address.
    #[must_use]
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Returns the message subject.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the plain-text body.
    #[must_use]
    pub fn text_body(&self) -> &str {
        &self.text_body
    }

    /// Returns the HTML alternative body, when one was attached.
    #[must_use]
    pub fn html_body(&self) -> Option<&str> {
        self.html_body.as_deref()
    }
}

/// Outbound message transport contract.
///
/// Transport failures propagate to the caller: a registration that cannot
/// notify its owner fails loudly rather than completing silently.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends a composed message to all of its recipients.
    async fn send(&self, message: &EmailMessage) -> NotifierResult<()>;
}

/// Errors returned by notifier implementations.
#[derive(Debug, Clone, Error)]
pub enum NotifierError {
    /// Message hand-off to the transport failed.
    #[error("notification transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotifierError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
