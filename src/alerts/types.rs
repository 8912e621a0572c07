//! Severity rule types
//!
//! A rule pairs a boundary condition on the scaled reading with a severity
//! level and the delivery hints that go with it.

use crate::domain::SeverityLevel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Boundary condition on the scaled value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    /// Value strictly greater than threshold
    GreaterThan(f64),
    /// Value strictly less than threshold
    LessThan(f64),
}

impl Condition {
    /// Evaluate condition against a value
    pub fn evaluate(&self, value: f64) -> bool {
        match self {
            Self::GreaterThan(threshold) => value > *threshold,
            Self::LessThan(threshold) => value < *threshold,
        }
    }

    /// The boundary value
    pub fn threshold(&self) -> f64 {
        match self {
            Self::GreaterThan(v) | Self::LessThan(v) => *v,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GreaterThan(v) => write!(f, "> {}", v),
            Self::LessThan(v) => write!(f, "< {}", v),
        }
    }
}

/// One row of the severity table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityRule {
    /// Condition on the scaled value
    pub condition: Condition,
    /// Severity when the condition holds
    pub level: SeverityLevel,
    /// Title prefix, the value is appended
    pub title: String,
    /// Channel sound
    pub sound: String,
    /// Event tag (`high` or `low`)
    pub event_name: String,
    /// Expiry in minutes, `None` leaves the channel default
    pub expiry_minutes: Option<u32>,
    /// Retry interval in minutes
    pub retry_minutes: Option<u32>,
}

impl SeverityRule {
    /// Create a rule with no delivery overrides
    pub fn new(
        condition: Condition,
        level: SeverityLevel,
        title: impl Into<String>,
        sound: impl Into<String>,
        event_name: impl Into<String>,
    ) -> Self {
        Self {
            condition,
            level,
            title: title.into(),
            sound: sound.into(),
            event_name: event_name.into(),
            expiry_minutes: None,
            retry_minutes: None,
        }
    }

    /// Set expiry
    pub fn with_expiry(mut self, minutes: u32) -> Self {
        self.expiry_minutes = Some(minutes);
        self
    }

    /// Set retry interval
    pub fn with_retry(mut self, minutes: u32) -> Self {
        self.retry_minutes = Some(minutes);
        self
    }

    /// Build the decision for a value that matched this rule
    pub fn decide(&self, value: f64) -> ThresholdDecision {
        ThresholdDecision {
            level: self.level,
            title: format!("{}: {}", self.title, value),
            event_name: self.event_name.clone(),
            sound: self.sound.clone(),
            expiry_minutes: self.expiry_minutes,
            retry_minutes: self.retry_minutes,
        }
    }
}

/// Ordered severity table
///
/// Rules are kept sorted by descending severity, so the first rule whose
/// condition holds is also the most severe one. Rules of equal severity keep
/// their given order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeverityRules {
    rules: Vec<SeverityRule>,
}

impl SeverityRules {
    /// Build a table from rules in any order
    pub fn new(mut rules: Vec<SeverityRule>) -> Self {
        rules.sort_by(|a, b| b.level.cmp(&a.level));
        Self { rules }
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> &[SeverityRule] {
        &self.rules
    }

    /// First (most severe) matching rule
    pub fn matching(&self, value: f64) -> Option<&SeverityRule> {
        self.rules.iter().find(|rule| rule.condition.evaluate(value))
    }
}

/// Outcome of evaluating a reading against the severity table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdDecision {
    /// Severity level
    pub level: SeverityLevel,
    /// Notification title, e.g. `Urgent, HIGH: 360`
    pub title: String,
    /// Event tag
    pub event_name: String,
    /// Channel sound
    pub sound: String,
    /// Expiry in minutes
    pub expiry_minutes: Option<u32>,
    /// Retry interval in minutes
    pub retry_minutes: Option<u32>,
}
