//! Channel message construction
//!
//! Resolves expiry and retry for a request and flattens it into the payload
//! the Pushover API expects.

use crate::domain::{NotificationRequest, Priority, SeverityLevel};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Expiry used when the request carries no override
pub const DEFAULT_EXPIRY_MINUTES: u32 = 20;

/// Retry for URGENT requests without an override
pub const URGENT_RETRY_MINUTES: u32 = 3;

/// Retry for other alarm-level requests without an override
pub const ALARM_RETRY_MINUTES: u32 = 20;

/// Sound used when the request names none
pub const DEFAULT_SOUND: &str = "gamelan";

/// Path appended to the base URL for acknowledgment callbacks
pub const CALLBACK_PATH: &str = "/api/v1/notifications/pushovercallback";

/// Flattened payload for one destination key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMessage {
    /// Destination key, empty until addressed
    pub user: String,
    /// Title
    pub title: String,
    /// Body
    pub message: String,
    /// Sound name
    pub sound: String,
    /// Unix timestamp in seconds
    pub timestamp: u64,
    /// Channel priority
    pub priority: Priority,
    /// Expiry in seconds
    pub expire: u64,
    /// Retry interval in seconds
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub retry: Option<u64>,
    /// Acknowledgment callback URL
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub callback: Option<String>,
}

impl ChannelMessage {
    /// Copy of this message addressed to `key`
    pub fn addressed_to(&self, key: &str) -> Self {
        Self {
            user: key.to_string(),
            ..self.clone()
        }
    }
}

/// Builds channel messages from notification requests
#[derive(Debug, Clone, Default)]
pub struct MessageBuilder {
    callback_url: Option<String>,
}

impl MessageBuilder {
    /// Create a builder; `base_url` enables acknowledgment callbacks
    pub fn new(base_url: Option<&str>) -> Self {
        let callback_url = base_url
            .map(|url| url.trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .map(|url| format!("{}{}", url, CALLBACK_PATH));

        Self { callback_url }
    }

    /// Callback URL attached to retrying messages, if any
    pub fn callback_url(&self) -> Option<&str> {
        self.callback_url.as_deref()
    }

    /// Build the message stamped with the current time
    pub fn build(&self, request: &NotificationRequest) -> ChannelMessage {
        self.build_at(request, SystemTime::now())
    }

    /// Build the message stamped with `now`
    pub fn build_at(&self, request: &NotificationRequest, now: SystemTime) -> ChannelMessage {
        let expiry_minutes = request.expiry_minutes.unwrap_or(DEFAULT_EXPIRY_MINUTES);
        let retry_minutes = effective_retry_minutes(request);

        let retry = retry_minutes.map(minutes_to_secs);
        let callback = retry.and(self.callback_url.clone());

        ChannelMessage {
            user: String::new(),
            title: request.title.clone(),
            message: request.message.clone(),
            sound: request
                .sound
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_SOUND.to_string()),
            timestamp: now
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default(),
            priority: request.level.priority(),
            expire: minutes_to_secs(expiry_minutes),
            retry,
            callback,
        }
    }
}

/// Retry interval in minutes, `None` when retry is disabled
///
/// An explicit override wins, with `0` meaning disabled. Otherwise alarm
/// levels retry (URGENT faster than WARN) and everything else does not.
pub fn effective_retry_minutes(request: &NotificationRequest) -> Option<u32> {
    let minutes = match request.retry_minutes {
        Some(minutes) => minutes,
        None if request.level == SeverityLevel::Urgent => URGENT_RETRY_MINUTES,
        None if request.level.is_alarm() => ALARM_RETRY_MINUTES,
        None => 0,
    };

    (minutes > 0).then_some(minutes)
}

fn minutes_to_secs(minutes: u32) -> u64 {
    u64::from(minutes) * 60
}
