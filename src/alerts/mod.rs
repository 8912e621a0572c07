//! Threshold alerting
//!
//! Maps glucose readings to severity decisions through an ordered rule table.

mod config;
mod evaluator;
mod types;

pub use config::{EvaluatorConfig, ThresholdConfig};
pub use evaluator::{Skip, ThresholdEvaluator};
pub use types::{Condition, SeverityRule, SeverityRules, ThresholdDecision};
