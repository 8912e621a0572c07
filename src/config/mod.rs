//! Configuration system
//!
//! Handles TOML config file parsing and CLI argument merging.

pub mod builder;
pub mod file;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;

use crate::alerts::{EvaluatorConfig, ThresholdConfig};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Default Pushover API root
pub const DEFAULT_API_URL: &str = "https://api.pushover.net/1";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,
    /// Pushover credentials and destination keys
    pub pushover: PushoverConfig,
    /// Host settings
    pub settings: SettingsConfig,
    /// Glucose thresholds
    pub thresholds: ThresholdConfig,
    /// Reading validity guards
    pub evaluator: EvaluatorConfig,
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,
    /// Evaluate and build messages without sending
    pub dry_run: bool,
}

/// Pushover configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PushoverConfig {
    /// Application API token
    pub api_token: Option<String>,
    /// API root URL
    pub api_url: String,
    /// Primary user keys
    pub user_key: KeySetting,
    /// Group keys, used when no user keys are set
    pub group_key: KeySetting,
    /// Keys for WARN/URGENT notifications
    pub alarm_key: KeySetting,
    /// Keys for announcements
    pub announcement_key: KeySetting,
}

impl Default for PushoverConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            api_url: DEFAULT_API_URL.to_string(),
            user_key: KeySetting::Unset,
            group_key: KeySetting::Unset,
            alarm_key: KeySetting::Unset,
            announcement_key: KeySetting::Unset,
        }
    }
}

/// Host settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SettingsConfig {
    /// Public base URL, used for acknowledgment callbacks
    pub base_url: Option<String>,
}

/// A destination key setting
///
/// In TOML this is either a space-separated string of keys or `false`.
/// `false` disables the category outright; an absent or empty value means
/// the category falls back to another key set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum KeySetting {
    /// Not configured
    #[default]
    Unset,
    /// Explicitly disabled
    Disabled,
    /// Configured keys
    Keys(Vec<String>),
}

impl KeySetting {
    /// Parse a space-separated key list
    pub fn parse(value: &str) -> Self {
        let keys: Vec<String> = value.split_whitespace().map(str::to_string).collect();
        if keys.is_empty() {
            Self::Unset
        } else {
            Self::Keys(keys)
        }
    }

    /// Resolve against a fallback list
    pub fn resolve(&self, fallback: &[String]) -> Vec<String> {
        match self {
            Self::Unset => fallback.to_vec(),
            Self::Disabled => Vec::new(),
            Self::Keys(keys) => keys.clone(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawKeySetting {
    Flag(bool),
    List(String),
}

impl<'de> Deserialize<'de> for KeySetting {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawKeySetting::deserialize(deserializer)? {
            RawKeySetting::Flag(false) => Self::Disabled,
            RawKeySetting::Flag(true) => Self::Unset,
            RawKeySetting::List(value) => Self::parse(&value),
        })
    }
}

impl Serialize for KeySetting {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unset => serializer.serialize_str(""),
            Self::Disabled => serializer.serialize_bool(false),
            Self::Keys(keys) => serializer.serialize_str(&keys.join(" ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.pushover.api_url, DEFAULT_API_URL);
        assert_eq!(config.pushover.user_key, KeySetting::Unset);
        assert!(config.settings.base_url.is_none());
        assert_eq!(config.thresholds.urgent_high, 350.0);
    }

    #[test]
    fn test_key_setting_from_toml() {
        let config: Config = toml::from_str(
            r#"
            [pushover]
            api_token = "tok"
            user_key = "A B"
            alarm_key = false
            announcement_key = ""
            "#,
        )
        .unwrap();

        assert_eq!(
            config.pushover.user_key,
            KeySetting::Keys(vec!["A".to_string(), "B".to_string()])
        );
        assert_eq!(config.pushover.alarm_key, KeySetting::Disabled);
        assert_eq!(config.pushover.announcement_key, KeySetting::Unset);
        assert_eq!(config.pushover.group_key, KeySetting::Unset);
    }

    #[test]
    fn test_key_setting_parse_collapses_whitespace() {
        assert_eq!(
            KeySetting::parse("  a   b "),
            KeySetting::Keys(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(KeySetting::parse("   "), KeySetting::Unset);
    }

    #[test]
    fn test_key_setting_resolve() {
        let fallback = vec!["F".to_string()];
        assert_eq!(KeySetting::Unset.resolve(&fallback), fallback);
        assert!(KeySetting::Disabled.resolve(&fallback).is_empty());
        assert_eq!(
            KeySetting::Keys(vec!["K".to_string()]).resolve(&fallback),
            vec!["K".to_string()]
        );
    }

    #[test]
    fn test_config_round_trip_keeps_disabled() {
        let mut config = Config::default();
        config.pushover.alarm_key = KeySetting::Disabled;
        let text = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.pushover.alarm_key, KeySetting::Disabled);
    }
}
