//! Threshold configuration
//!
//! TOML-friendly form of the severity table and evaluator guards.

use super::types::{Condition, SeverityRule, SeverityRules};
use crate::domain::SeverityLevel;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Glucose thresholds in display units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Above this is URGENT
    pub urgent_high: f64,
    /// Above this is WARN
    pub warn_high: f64,
    /// Above this is INFO
    pub info_high: f64,
    /// Below this is WARN
    pub warn_low: f64,
    /// Below this is URGENT
    pub urgent_low: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            urgent_high: 350.0,
            warn_high: 270.0,
            info_high: 180.0,
            warn_low: 80.0,
            urgent_low: 65.0,
        }
    }
}

impl ThresholdConfig {
    /// Check that the bands nest: urgent_low < warn_low < info_high < warn_high < urgent_high
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ordered = [
            ("urgent_low", self.urgent_low),
            ("warn_low", self.warn_low),
            ("info_high", self.info_high),
            ("warn_high", self.warn_high),
            ("urgent_high", self.urgent_high),
        ];

        for pair in ordered.windows(2) {
            let (lower_key, lower) = pair[0];
            let (upper_key, upper) = pair[1];
            if lower >= upper {
                return Err(ConfigError::InvalidValue {
                    key: format!("thresholds.{}", upper_key),
                    message: format!(
                        "must be greater than thresholds.{} ({} >= {})",
                        lower_key, lower, upper
                    ),
                });
            }
        }

        Ok(())
    }

    /// Build the severity table
    pub fn to_rules(&self) -> SeverityRules {
        SeverityRules::new(vec![
            SeverityRule::new(
                Condition::GreaterThan(self.urgent_high),
                SeverityLevel::Urgent,
                "Urgent, HIGH",
                "persistent",
                "high",
            )
            .with_expiry(30)
            .with_retry(5),
            SeverityRule::new(
                Condition::GreaterThan(self.warn_high),
                SeverityLevel::Warn,
                "Warning, HIGH",
                "persistent",
                "high",
            )
            .with_expiry(30)
            .with_retry(5),
            SeverityRule::new(
                Condition::GreaterThan(self.info_high),
                SeverityLevel::Info,
                "Warning, HIGH",
                "climb",
                "high",
            )
            .with_expiry(30)
            .with_retry(15),
            SeverityRule::new(
                Condition::LessThan(self.warn_low),
                SeverityLevel::Warn,
                "Warning, LOW",
                "persistent",
                "low",
            )
            .with_expiry(30)
            .with_retry(15),
            SeverityRule::new(
                Condition::LessThan(self.urgent_low),
                SeverityLevel::Urgent,
                "Urgent, LOW",
                "falling",
                "low",
            )
            .with_retry(2),
        ])
    }
}

/// Reading validity guards
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Raw mg/dL must exceed this; lower values are sensor error codes
    pub floor_mgdl: f64,
    /// Readings older than this are ignored
    pub freshness_minutes: u64,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            floor_mgdl: 39.0,
            freshness_minutes: 10,
        }
    }
}

impl EvaluatorConfig {
    /// Freshness window as a duration
    pub fn freshness(&self) -> Duration {
        Duration::from_secs(self.freshness_minutes.saturating_mul(60))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds_valid() {
        assert!(ThresholdConfig::default().validate().is_ok());
    }

    #[test]
    fn test_overlapping_thresholds_rejected() {
        let config = ThresholdConfig {
            warn_low: 190.0,
            ..ThresholdConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "thresholds.info_high"));
    }

    #[test]
    fn test_default_rule_order() {
        let rules = ThresholdConfig::default().to_rules();
        let order: Vec<String> = rules
            .rules()
            .iter()
            .map(|r| format!("{} {}", r.level, r.condition))
            .collect();

        assert_eq!(
            order,
            vec![
                "URGENT > 350",
                "URGENT < 65",
                "WARN > 270",
                "WARN < 80",
                "INFO > 180",
            ]
        );
    }

    #[test]
    fn test_parse_partial_thresholds() {
        let config: ThresholdConfig = toml::from_str("urgent_high = 300.0").unwrap();
        assert_eq!(config.urgent_high, 300.0);
        assert_eq!(config.warn_low, 80.0);
    }

    #[test]
    fn test_evaluator_freshness() {
        assert_eq!(EvaluatorConfig::default().freshness(), Duration::from_secs(600));
    }
}
