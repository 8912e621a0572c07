//! Threshold evaluator
//!
//! Turns a reading into a severity decision. Pure: no I/O, no state.

use super::config::EvaluatorConfig;
use super::types::{SeverityRules, ThresholdDecision};
use crate::domain::Reading;
use std::fmt;
use std::time::{Duration, SystemTime};

/// Why a reading produced no decision
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Skip {
    /// Scaled value is not a positive number
    Implausible,
    /// Raw value at or below the sensor error floor
    BelowFloor,
    /// Reading is older than the freshness window
    Stale(Duration),
    /// Value is inside the target range
    InRange,
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Implausible => write!(f, "implausible value"),
            Self::BelowFloor => write!(f, "sensor error code"),
            Self::Stale(age) => write!(f, "stale by {}s", age.as_secs()),
            Self::InRange => write!(f, "in range"),
        }
    }
}

/// Applies the severity table to readings
#[derive(Debug, Clone)]
pub struct ThresholdEvaluator {
    rules: SeverityRules,
    config: EvaluatorConfig,
}

impl ThresholdEvaluator {
    /// Create an evaluator
    pub fn new(rules: SeverityRules, config: EvaluatorConfig) -> Self {
        Self { rules, config }
    }

    /// The severity table in evaluation order
    pub fn rules(&self) -> &SeverityRules {
        &self.rules
    }

    /// Evaluate a reading at `now`
    ///
    /// Returns `None` when the reading is invalid, stale, or in range.
    pub fn evaluate(&self, reading: &Reading, now: SystemTime) -> Option<ThresholdDecision> {
        self.classify(reading, now).ok()
    }

    /// Evaluate a reading, reporting why no decision was produced
    pub fn classify(&self, reading: &Reading, now: SystemTime) -> Result<ThresholdDecision, Skip> {
        if !(reading.scaled.is_finite() && reading.scaled > 0.0) {
            return Err(Skip::Implausible);
        }

        if reading.mgdl.is_nan() || reading.mgdl <= self.config.floor_mgdl {
            return Err(Skip::BelowFloor);
        }

        let age = reading.age(now);
        if age >= self.config.freshness() {
            return Err(Skip::Stale(age));
        }

        log::debug!("checking whether to alarm at {}", reading.scaled);

        self.rules
            .matching(reading.scaled)
            .map(|rule| rule.decide(reading.scaled))
            .ok_or(Skip::InRange)
    }
}

impl Default for ThresholdEvaluator {
    fn default() -> Self {
        Self::new(
            super::config::ThresholdConfig::default().to_rules(),
            EvaluatorConfig::default(),
        )
    }
}
