//! Mock implementations for testing
//!
//! Provides a recording push transport for testing dispatch without network
//! access.

use crate::domain::{Priority, Receipt};
use crate::error::TransportError;
use crate::pushover::{ChannelMessage, PushTransport, SendReceipt};

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;
use tokio::sync::Notify;

/// Mock push transport
///
/// Records every message it is asked to send. Keys registered with
/// [`failing_key`](MockTransport::failing_key) are rejected; a key registered
/// with [`holding_key`](MockTransport::holding_key) blocks until
/// [`release`](MockTransport::release) is called.
#[derive(Debug, Default)]
pub struct MockTransport {
    sent: Mutex<Vec<ChannelMessage>>,
    failing: HashSet<String>,
    held: Option<String>,
    gate: Notify,
}

impl MockTransport {
    /// Create a transport that accepts everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: reject sends to `key`
    pub fn failing_key(mut self, key: impl Into<String>) -> Self {
        self.failing.insert(key.into());
        self
    }

    /// Builder: hold sends to `key` until released
    pub fn holding_key(mut self, key: impl Into<String>) -> Self {
        self.held = Some(key.into());
        self
    }

    /// Let a held send complete
    pub fn release(&self) {
        self.gate.notify_one();
    }

    /// Messages sent so far
    pub fn sent(&self) -> Vec<ChannelMessage> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of send attempts
    pub fn send_count(&self) -> usize {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl PushTransport for MockTransport {
    fn name(&self) -> &str {
        "mock"
    }

    async fn send(&self, message: &ChannelMessage) -> Result<SendReceipt, TransportError> {
        let count = {
            let mut sent = self.sent.lock().unwrap_or_else(|e| e.into_inner());
            sent.push(message.clone());
            sent.len()
        };

        if self.held.as_deref() == Some(message.user.as_str()) {
            self.gate.notified().await;
        }

        if self.failing.contains(&message.user) {
            return Err(TransportError::Rejected {
                status: 400,
                errors: "user identifier is invalid".to_string(),
            });
        }

        let receipt = if message.priority == Priority::Emergency {
            Receipt::new(format!("mockreceipt{}", count)).ok()
        } else {
            None
        };

        Ok(SendReceipt {
            request: format!("mock-request-{}", count),
            receipt,
        })
    }
}
