//! Test and embedding notifiers: a recording outbox and a discarding sink.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::registration::ports::{EmailMessage, Notifier, NotifierError, NotifierResult};

/// Notifier that records every message into an in-memory outbox.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    outbox: Arc<RwLock<Vec<EmailMessage>>>,
}

impl RecordingNotifier {
    /// Creates an empty recording notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every recorded message, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError::Transport`] when the outbox lock is
    /// poisoned.
    pub fn messages(&self) -> NotifierResult<Vec<EmailMessage>> {
        let outbox = self
            .outbox
            .read()
            .map_err(|err| NotifierError::transport(std::io::Error::other(err.to_string())))?;
        Ok(outbox.clone())
    }

    /// Returns the number of recorded messages.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError::Transport`] when the outbox lock is
    /// poisoned.
    pub fn count(&self) -> NotifierResult<usize> {
        let outbox = self
            .outbox
            .read()
            .map_err(|err| NotifierError::transport(std::io::Error::other(err.to_string())))?;
        Ok(outbox.len())
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, message: &EmailMessage) -> NotifierResult<()> {
        let mut outbox = self
            .outbox
            .write()
            .map_err(|err| NotifierError::transport(std::io::Error::other(err.to_string())))?;
        outbox.push(message.clone());
        Ok(())
    }
}

/// Notifier that accepts and drops every message.
///
/// Used where a notifier is structurally required but no delivery is
/// wanted, such as the expiry sweep binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardNotifier;

impl DiscardNotifier {
    /// Creates a discarding notifier.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for DiscardNotifier {
    async fn send(&self, _message: &EmailMessage) -> NotifierResult<()> {
        Ok(())
    }
}
