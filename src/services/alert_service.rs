//! Alert service
//!
//! Evaluates readings and hands resulting notifications to Pushover.

use crate::alerts::{EvaluatorConfig, Skip, ThresholdConfig, ThresholdDecision, ThresholdEvaluator};
use crate::config::Config;
use crate::domain::{NotificationRequest, Reading};
use crate::pushover::{DispatchOutcome, Pushover};

use std::time::SystemTime;

/// A reading that crossed a threshold
#[derive(Debug)]
pub struct RaisedAlert {
    /// What the evaluator decided
    pub decision: ThresholdDecision,
    /// The request built from the decision
    pub request: NotificationRequest,
    /// Dispatch result; `None` in dry-run mode or without Pushover
    pub dispatch: Option<DispatchOutcome>,
}

/// Glue between threshold evaluation and notification dispatch
pub struct AlertService {
    evaluator: ThresholdEvaluator,
    thresholds: ThresholdConfig,
    pushover: Option<Pushover>,
    dry_run: bool,
}

impl AlertService {
    /// Create a new alert service
    pub fn new(
        thresholds: ThresholdConfig,
        evaluator: EvaluatorConfig,
        pushover: Option<Pushover>,
        dry_run: bool,
    ) -> Self {
        Self {
            evaluator: ThresholdEvaluator::new(thresholds.to_rules(), evaluator),
            thresholds,
            pushover,
            dry_run,
        }
    }

    /// Create the service from configuration
    pub fn from_config(config: &Config, pushover: Option<Pushover>) -> Self {
        Self::new(
            config.thresholds,
            config.evaluator,
            pushover,
            config.general.dry_run,
        )
    }

    /// Whether a notification channel is available
    pub fn can_notify(&self) -> bool {
        self.pushover.is_some()
    }

    /// Evaluate a reading and notify when it crosses a threshold
    ///
    /// Outside a Tokio runtime the notification is logged and dropped.
    pub fn check(&self, reading: &Reading, now: SystemTime) -> Result<RaisedAlert, Skip> {
        let decision = self.evaluator.classify(reading, now)?;
        let request = self.build_request(&decision, reading);

        log::info!("{} alert for {}, sending notification", decision.level, reading);
        let dispatch = self.notify(&request);

        Ok(RaisedAlert {
            decision,
            request,
            dispatch,
        })
    }

    /// Send a notification request
    ///
    /// Returns `None` when nothing was attempted.
    pub fn notify(&self, request: &NotificationRequest) -> Option<DispatchOutcome> {
        if self.dry_run {
            log::info!("DRY RUN: Would send '{}' ({})", request.title, request.level);
            return None;
        }

        let pushover = match &self.pushover {
            Some(pushover) => pushover,
            None => {
                log::debug!("Pushover not configured, dropping '{}'", request.title);
                return None;
            }
        };

        match pushover.dispatcher().dispatch(request) {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                log::error!("unable to dispatch '{}': {}", request.title, e);
                None
            }
        }
    }

    /// Build the notification request for a decision
    pub fn build_request(&self, decision: &ThresholdDecision, reading: &Reading) -> NotificationRequest {
        let mut request = NotificationRequest::new(
            decision.level,
            decision.title.clone(),
            format!("BG Now: {}", reading.scaled),
        )
        .with_sound(decision.sound.clone())
        .with_event_name(decision.event_name.clone())
        .with_debug(serde_json::json!({
            "lastSGV": reading.scaled,
            "thresholds": self.thresholds,
        }));

        request.expiry_minutes = decision.expiry_minutes;
        request.retry_minutes = decision.retry_minutes;
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeySetting;
    use crate::domain::{Priority, SeverityLevel};
    use crate::mock::MockTransport;
    use std::sync::Arc;
    use std::time::Duration;

    fn service_with(transport: Arc<MockTransport>, dry_run: bool) -> AlertService {
        let mut config = Config::default();
        config.pushover.api_token = Some("tok".to_string());
        config.pushover.user_key = KeySetting::parse("U");
        config.pushover.alarm_key = KeySetting::parse("A1 A2");
        config.general.dry_run = dry_run;

        let pushover = Pushover::with_transport(&config, transport).unwrap();
        AlertService::from_config(&config, Some(pushover))
    }

    #[tokio::test]
    async fn test_urgent_high_end_to_end() {
        let transport = Arc::new(MockTransport::new());
        let service = service_with(transport.clone(), false);
        let now = SystemTime::now();
        let reading = Reading::new(360.0, now - Duration::from_secs(30));

        let alert = service.check(&reading, now).unwrap();
        assert_eq!(alert.decision.level, SeverityLevel::Urgent);
        assert_eq!(alert.request.message, "BG Now: 360");
        assert_eq!(alert.request.debug["lastSGV"], 360.0);

        let outcomes = alert.dispatch.unwrap().settle().await;
        assert_eq!(outcomes.len(), 2);

        let sent = transport.sent();
        assert_eq!(sent.len(), 2);
        for message in &sent {
            assert!(message.user == "A1" || message.user == "A2");
            assert_eq!(message.priority, Priority::Emergency);
            assert_eq!(message.expire, 1800);
            assert_eq!(message.retry, Some(300));
        }
    }

    #[tokio::test]
    async fn test_urgent_low_defaults_expiry() {
        let transport = Arc::new(MockTransport::new());
        let service = service_with(transport.clone(), false);
        let now = SystemTime::now();

        let alert = service.check(&Reading::new(60.0, now), now).unwrap();
        alert.dispatch.unwrap().settle().await;

        let sent = transport.sent();
        assert_eq!(sent[0].expire, 1200);
        assert_eq!(sent[0].retry, Some(120));
        assert_eq!(sent[0].sound, "falling");
    }

    #[tokio::test]
    async fn test_in_range_sends_nothing() {
        let transport = Arc::new(MockTransport::new());
        let service = service_with(transport.clone(), false);
        let now = SystemTime::now();

        let result = service.check(&Reading::new(150.0, now), now);
        assert!(matches!(result, Err(Skip::InRange)));
        assert_eq!(transport.send_count(), 0);
    }

    #[tokio::test]
    async fn test_dry_run_skips_dispatch() {
        let transport = Arc::new(MockTransport::new());
        let service = service_with(transport.clone(), true);
        let now = SystemTime::now();

        let alert = service.check(&Reading::new(400.0, now), now).unwrap();
        assert!(alert.dispatch.is_none());
        assert_eq!(transport.send_count(), 0);
    }

    #[test]
    fn test_without_pushover() {
        let service = AlertService::from_config(&Config::default(), None);
        assert!(!service.can_notify());

        let request = NotificationRequest::new(SeverityLevel::Urgent, "t", "m");
        assert!(service.notify(&request).is_none());
    }

    #[test]
    fn test_check_outside_runtime_does_not_panic() {
        let transport = Arc::new(MockTransport::new());
        let service = service_with(transport.clone(), false);
        let now = SystemTime::now();

        let alert = service.check(&Reading::new(400.0, now), now).unwrap();
        assert_eq!(alert.decision.level, SeverityLevel::Urgent);
        assert!(alert.dispatch.is_none());
        assert_eq!(transport.send_count(), 0);
    }
}
