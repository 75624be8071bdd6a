//! Chat webhook notifications

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Webhook rejected the message with status {0}")]
    Status(u16),
}

/// Something that can deliver an order message
pub trait Notifier: Send + Sync {
    fn send(&self, message: &str) -> Result<(), NotifyError>;

    fn is_enabled(&self) -> bool {
        true
    }
}

#[derive(Serialize)]
struct WebhookPayload<'a> {
    content: &'a str,
}

/// Posts order messages to a chat webhook URL
pub struct WebhookNotifier {
    url: String,
    agent: ureq::Agent,
}

impl WebhookNotifier {
    pub fn new(url: &str, timeout: Duration) -> Self {
        Self {
            url: url.to_string(),
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }
}

impl Notifier for WebhookNotifier {
    fn send(&self, message: &str) -> Result<(), NotifyError> {
        self.agent
            .post(&self.url)
            .send_json(WebhookPayload { content: message })
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => NotifyError::Status(code),
                other => NotifyError::Network(other.to_string()),
            })?;
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        !self.url.trim().is_empty()
    }
}
