//! Notification dispatcher
//!
//! Selects destination keys for a request, builds the message once, and
//! spawns one independent send per key. A failing key never affects its
//! siblings; there is no aggregate success.

use super::keys::KeyRouter;
use super::message::{ChannelMessage, MessageBuilder};
use super::transport::{PushTransport, SendReceipt};
use crate::domain::NotificationRequest;
use crate::error::TransportError;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Outcome of a single dispatch
#[derive(Debug)]
pub enum DispatchOutcome {
    /// No destination key is configured for the request's category
    NoKeyDefined,
    /// One in-flight send per selected key
    Dispatched(Vec<PendingDelivery>),
}

impl DispatchOutcome {
    /// Whether dispatch stopped for lack of keys
    pub fn is_no_key_defined(&self) -> bool {
        matches!(self, Self::NoKeyDefined)
    }

    /// Wait for every in-flight send
    ///
    /// Sends are already running; this only collects their results.
    pub async fn settle(self) -> Vec<DeliveryOutcome> {
        match self {
            Self::NoKeyDefined => Vec::new(),
            Self::Dispatched(pending) => {
                let mut outcomes = Vec::with_capacity(pending.len());
                for delivery in pending {
                    outcomes.push(delivery.outcome().await);
                }
                outcomes
            }
        }
    }
}

/// An in-flight send to one key
#[derive(Debug)]
pub struct PendingDelivery {
    key: String,
    handle: JoinHandle<Result<SendReceipt, TransportError>>,
}

impl PendingDelivery {
    /// Destination key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether the send has completed
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for this send only
    pub async fn outcome(self) -> DeliveryOutcome {
        let result = match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(TransportError::TaskFailed(e.to_string())),
        };

        DeliveryOutcome {
            key: self.key,
            result,
        }
    }
}

/// Result of the send to one key
#[derive(Debug)]
pub struct DeliveryOutcome {
    /// Destination key
    pub key: String,
    /// Transport result
    pub result: Result<SendReceipt, TransportError>,
}

/// Fans notifications out to destination keys
pub struct Dispatcher {
    router: KeyRouter,
    builder: MessageBuilder,
    transport: Arc<dyn PushTransport>,
}

impl Dispatcher {
    /// Create a dispatcher
    pub fn new(router: KeyRouter, builder: MessageBuilder, transport: Arc<dyn PushTransport>) -> Self {
        Self {
            router,
            builder,
            transport,
        }
    }

    /// Key sets in use
    pub fn router(&self) -> &KeyRouter {
        &self.router
    }

    /// Dispatch a request
    ///
    /// Returns immediately after spawning the per-key sends on the current
    /// Tokio runtime. Fails with [`TransportError::NoRuntime`] when there is
    /// none.
    pub fn dispatch(&self, request: &NotificationRequest) -> Result<DispatchOutcome, TransportError> {
        let keys = self.router.select_keys(request);

        if keys.is_empty() {
            log::warn!(
                "no {} key defined, not sending '{}'",
                request.category(),
                request.title
            );
            return Ok(DispatchOutcome::NoKeyDefined);
        }

        let runtime =
            Handle::try_current().map_err(|e| TransportError::NoRuntime(e.to_string()))?;

        let message = self.builder.build(request);
        log::debug!(
            "dispatching '{}' ({}, priority {}) to {} key(s) via {}",
            message.title,
            request.level,
            message.priority,
            keys.len(),
            self.transport.name()
        );

        let pending = keys
            .iter()
            .map(|key| PendingDelivery {
                key: key.clone(),
                handle: runtime.spawn(send_one(
                    Arc::clone(&self.transport),
                    message.addressed_to(key),
                )),
            })
            .collect();

        Ok(DispatchOutcome::Dispatched(pending))
    }
}

async fn send_one(
    transport: Arc<dyn PushTransport>,
    message: ChannelMessage,
) -> Result<SendReceipt, TransportError> {
    let result = transport.send(&message).await;

    match &result {
        Ok(receipt) => log::info!(
            "sent {} notification '{}' to {}: request {}",
            transport.name(),
            message.title,
            message.user,
            receipt.request
        ),
        Err(e) => log::error!(
            "unable to send {} notification '{}' to {}: {}",
            transport.name(),
            message.title,
            message.user,
            e
        ),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Priority, SeverityLevel};
    use crate::mock::MockTransport;

    fn keys(list: &[&str]) -> Vec<String> {
        list.iter().map(|k| k.to_string()).collect()
    }

    fn dispatcher(router: KeyRouter, transport: Arc<MockTransport>) -> Dispatcher {
        Dispatcher::new(router, MessageBuilder::new(None), transport)
    }

    #[tokio::test]
    async fn test_fan_out_to_alarm_keys() {
        let transport = Arc::new(MockTransport::new());
        let router = KeyRouter::new(keys(&["U"]), keys(&["A1", "A2"]), keys(&["U"]));
        let request = NotificationRequest::new(SeverityLevel::Urgent, "Urgent, HIGH: 360", "BG Now: 360")
            .with_sound("persistent")
            .with_expiry(30)
            .with_retry(5);

        let outcomes = dispatcher(router, transport.clone())
            .dispatch(&request)
            .unwrap()
            .settle()
            .await;

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| o.result.is_ok()));

        let mut sent = transport.sent();
        sent.sort_by(|a, b| a.user.cmp(&b.user));
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].user, "A1");
        assert_eq!(sent[1].user, "A2");
        for message in &sent {
            assert_eq!(message.priority, Priority::Emergency);
            assert_eq!(message.expire, 1800);
            assert_eq!(message.retry, Some(300));
        }
    }

    #[tokio::test]
    async fn test_no_key_defined_skips_transport() {
        let transport = Arc::new(MockTransport::new());
        let router = KeyRouter::new(keys(&["U"]), Vec::new(), keys(&["U"]));
        let request = NotificationRequest::new(SeverityLevel::Warn, "t", "m");

        let outcome = dispatcher(router, transport.clone()).dispatch(&request).unwrap();

        assert!(outcome.is_no_key_defined());
        assert!(outcome.settle().await.is_empty());
        assert_eq!(transport.send_count(), 0);
    }

    #[tokio::test]
    async fn test_failing_key_does_not_block_siblings() {
        let transport = Arc::new(MockTransport::new().failing_key("BAD"));
        let router = KeyRouter::new(keys(&["GOOD", "BAD", "ALSO_GOOD"]), Vec::new(), Vec::new());
        let request = NotificationRequest::new(SeverityLevel::Info, "t", "m");

        let outcomes = dispatcher(router, transport.clone())
            .dispatch(&request)
            .unwrap()
            .settle()
            .await;

        assert_eq!(outcomes.len(), 3);
        for outcome in &outcomes {
            if outcome.key == "BAD" {
                assert!(matches!(outcome.result, Err(TransportError::Rejected { .. })));
            } else {
                assert!(outcome.result.is_ok());
            }
        }
        assert_eq!(transport.send_count(), 3);
    }

    #[tokio::test]
    async fn test_sends_are_independent() {
        let transport = Arc::new(MockTransport::new().holding_key("SLOW"));
        let router = KeyRouter::new(keys(&["SLOW", "FAST"]), Vec::new(), Vec::new());
        let request = NotificationRequest::new(SeverityLevel::Info, "t", "m");

        let DispatchOutcome::Dispatched(mut pending) =
            dispatcher(router, transport.clone()).dispatch(&request).unwrap()
        else {
            panic!("Expected Dispatched outcome");
        };

        let fast = pending.pop().unwrap();
        let slow = pending.pop().unwrap();
        assert_eq!(fast.key(), "FAST");
        assert_eq!(slow.key(), "SLOW");

        // The fast send completes while the slow one is still held
        let fast = fast.outcome().await;
        assert!(fast.result.is_ok());
        assert!(!slow.is_finished());

        transport.release();
        assert!(slow.outcome().await.result.is_ok());
    }

    #[tokio::test]
    async fn test_emergency_send_returns_receipt() {
        let transport = Arc::new(MockTransport::new());
        let router = KeyRouter::new(Vec::new(), keys(&["A"]), Vec::new());
        let request = NotificationRequest::new(SeverityLevel::Urgent, "t", "m");

        let outcomes = dispatcher(router, transport)
            .dispatch(&request)
            .unwrap()
            .settle()
            .await;
        let receipt = outcomes[0].result.as_ref().unwrap();
        assert!(receipt.receipt.is_some());
    }

    #[test]
    fn test_dispatch_without_runtime_is_an_error() {
        let transport = Arc::new(MockTransport::new());
        let router = KeyRouter::new(keys(&["U"]), Vec::new(), Vec::new());
        let request = NotificationRequest::new(SeverityLevel::Info, "t", "m");

        let result = dispatcher(router, transport.clone()).dispatch(&request);

        assert!(matches!(result, Err(TransportError::NoRuntime(_))));
        assert_eq!(transport.send_count(), 0);
    }

    #[test]
    fn test_no_key_defined_without_runtime() {
        let transport = Arc::new(MockTransport::new());
        let router = KeyRouter::default();
        let request = NotificationRequest::new(SeverityLevel::Info, "t", "m");

        let outcome = dispatcher(router, transport).dispatch(&request).unwrap();
        assert!(outcome.is_no_key_defined());
    }
}
