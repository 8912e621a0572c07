//! Notification request types
//!
//! A [`NotificationRequest`] is built once per alert event and handed to the
//! dispatcher. It is never mutated after construction.

use super::level::SeverityLevel;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which destination key set a notification goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Default user/group keys
    User,
    /// Alarm-level notifications
    Alarm,
    /// Announcements
    Announcement,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Alarm => write!(f, "alarm"),
            Self::Announcement => write!(f, "announcement"),
        }
    }
}

/// Request to notify, as handed over by the alerting side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRequest {
    /// Severity of the event
    pub level: SeverityLevel,
    /// Message title
    pub title: String,
    /// Message body
    pub message: String,
    /// Announcements bypass level-based routing
    pub is_announcement: bool,
    /// Channel sound name
    pub sound: Option<String>,
    /// Expiry override in minutes
    pub expiry_minutes: Option<u32>,
    /// Retry override in minutes; `Some(0)` disables retry
    pub retry_minutes: Option<u32>,
    /// Event tag such as `high` or `low`
    pub event_name: Option<String>,
    /// Opaque diagnostic payload
    pub debug: serde_json::Value,
}

impl NotificationRequest {
    /// Create a request with no overrides
    pub fn new(level: SeverityLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
            is_announcement: false,
            sound: None,
            expiry_minutes: None,
            retry_minutes: None,
            event_name: None,
            debug: serde_json::Value::Null,
        }
    }

    /// Mark as an announcement
    pub fn announcement(mut self) -> Self {
        self.is_announcement = true;
        self
    }

    /// Set the sound hint
    pub fn with_sound(mut self, sound: impl Into<String>) -> Self {
        self.sound = Some(sound.into());
        self
    }

    /// Override expiry
    pub fn with_expiry(mut self, minutes: u32) -> Self {
        self.expiry_minutes = Some(minutes);
        self
    }

    /// Override retry
    pub fn with_retry(mut self, minutes: u32) -> Self {
        self.retry_minutes = Some(minutes);
        self
    }

    /// Set the event tag
    pub fn with_event_name(mut self, name: impl Into<String>) -> Self {
        self.event_name = Some(name.into());
        self
    }

    /// Attach diagnostic context
    pub fn with_debug(mut self, debug: serde_json::Value) -> Self {
        self.debug = debug;
        self
    }

    /// Destination category
    pub fn category(&self) -> Category {
        if self.is_announcement {
            Category::Announcement
        } else if self.level.is_alarm() {
            Category::Alarm
        } else {
            Category::User
        }
    }
}

/// Delivery receipt for an emergency-priority message
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Receipt(String);

impl Receipt {
    /// Create a receipt, rejecting anything that is not a bare token
    pub fn new(token: impl Into<String>) -> Result<Self, DomainError> {
        let token = token.into();
        if token.is_empty() || !token.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DomainError::InvalidReceipt(token));
        }
        Ok(Self(token))
    }

    /// The receipt token
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Receipt {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Receipt> for String {
    fn from(receipt: Receipt) -> Self {
        receipt.0
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
