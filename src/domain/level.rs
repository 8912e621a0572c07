//! Severity levels and channel priorities
//!
//! Severity is the ordered urgency of an alert; priority is what the push
//! channel understands. The mapping between them is total.

use crate::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Alert severity, ordered from least to most urgent
///
/// Serializes as its lowercase name. Deserializes from a name or from the
/// host framework's integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    /// No alert
    None,
    /// Barely worth mentioning
    Lowest,
    /// Low importance
    Low,
    /// Informational
    Info,
    /// Attention required
    Warn,
    /// Immediate action required
    Urgent,
}

impl SeverityLevel {
    /// All levels in ascending order
    pub const ALL: [SeverityLevel; 6] = [
        Self::None,
        Self::Lowest,
        Self::Low,
        Self::Info,
        Self::Warn,
        Self::Urgent,
    ];

    /// Integer code used by the host framework
    pub const fn code(&self) -> i8 {
        match self {
            Self::Urgent => 2,
            Self::Warn => 1,
            Self::Info => 0,
            Self::Low => -1,
            Self::Lowest => -2,
            Self::None => -3,
        }
    }

    /// Look up a level from its host framework code
    pub fn from_code(code: i8) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.code() == code)
    }

    /// Whether notifications at this level escalate and go to the alarm keys
    pub fn is_alarm(&self) -> bool {
        *self >= Self::Warn
    }

    /// Channel priority for this level
    pub const fn priority(&self) -> Priority {
        match self {
            Self::Urgent => Priority::Emergency,
            Self::Warn => Priority::High,
            Self::Info => Priority::Normal,
            Self::Low => Priority::Quiet,
            Self::Lowest | Self::None => Priority::Silent,
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "NONE"),
            Self::Lowest => write!(f, "LOWEST"),
            Self::Low => write!(f, "LOW"),
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Urgent => write!(f, "URGENT"),
        }
    }
}

impl FromStr for SeverityLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "lowest" => Ok(Self::Lowest),
            "low" => Ok(Self::Low),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "urgent" => Ok(Self::Urgent),
            _ => Err(DomainError::UnknownLevel(s.to_string())),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLevel {
    Code(i8),
    Name(String),
}

impl<'de> Deserialize<'de> for SeverityLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawLevel::deserialize(deserializer)? {
            RawLevel::Code(code) => Self::from_code(code).ok_or_else(|| {
                serde::de::Error::custom(DomainError::UnknownLevel(code.to_string()))
            }),
            RawLevel::Name(name) => name.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Pushover message priority
///
/// Serialized as the integer the Pushover API expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Priority {
    /// No notification or alert is generated
    Silent,
    /// Delivered without sound or vibration
    Quiet,
    /// Sound unless the device is in quiet hours
    Normal,
    /// Bypasses quiet hours
    High,
    /// Bypasses quiet hours and repeats until acknowledged
    Emergency,
}

impl Priority {
    /// Wire value
    pub const fn value(&self) -> i8 {
        match self {
            Self::Silent => -2,
            Self::Quiet => -1,
            Self::Normal => 0,
            Self::High => 1,
            Self::Emergency => 2,
        }
    }

    /// Priority for a raw host level code
    ///
    /// Entry point for hosts that pass integer levels straight through.
    /// Unknown codes map to [`Priority::Emergency`].
    pub fn for_code(code: i8) -> Self {
        SeverityLevel::from_code(code)
            .map(|level| level.priority())
            .unwrap_or(Self::Emergency)
    }
}

impl From<Priority> for i8 {
    fn from(priority: Priority) -> Self {
        priority.value()
    }
}

impl TryFrom<i8> for Priority {
    type Error = DomainError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -2 => Ok(Self::Silent),
            -1 => Ok(Self::Quiet),
            0 => Ok(Self::Normal),
            1 => Ok(Self::High),
            2 => Ok(Self::Emergency),
            _ => Err(DomainError::InvalidValue(format!(
                "priority {} (must be -2..=2)",
                value
            ))),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Silent => write!(f, "silent"),
            Self::Quiet => write!(f, "quiet"),
            Self::Normal => write!(f, "normal"),
            Self::High => write!(f, "high"),
            Self::Emergency => write!(f, "emergency"),
        }
    }
}
