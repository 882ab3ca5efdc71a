//! Mailer that records messages instead of sending them.

use async_trait::async_trait;
use formbridge_core::{CoreError, EmailMessage, Mailer};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Records every message it is asked to send.
#[derive(Debug, Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<RwLock<Vec<EmailMessage>>>,
    fail: Arc<AtomicBool>,
}

impl RecordingMailer {
    /// Creates a mailer with an empty outbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every send fail.
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Messages sent so far.
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.read().clone()
    }

    /// Messages sent to `recipient`.
    pub fn sent_to(&self, recipient: &str) -> Vec<EmailMessage> {
        self.sent
            .read()
            .iter()
            .filter(|m| m.to == recipient)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), CoreError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(CoreError::DeliveryFailure(format!("mailbox {} unavailable", message.to)));
        }
        self.sent.write().push(message.clone());
        Ok(())
    }
}
