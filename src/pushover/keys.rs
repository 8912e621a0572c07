//! Destination key routing
//!
//! Three key sets are resolved once from configuration:
//!
//! - user: `user_key`, or `group_key` when `user_key` is unset or empty
//! - alarm: `alarm_key`, falling back to the user keys
//! - announcement: `announcement_key`, falling back to the user keys, or the
//!   alarm keys when there are no user keys
//!
//! A key set configured as `false` is empty and never falls back.

use crate::config::{KeySetting, PushoverConfig};
use crate::domain::{Category, NotificationRequest};
use serde::Serialize;

/// Resolved destination key sets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeyRouter {
    user: Vec<String>,
    alarm: Vec<String>,
    announcement: Vec<String>,
}

impl KeyRouter {
    /// Create a router from already-resolved key sets
    pub fn new(user: Vec<String>, alarm: Vec<String>, announcement: Vec<String>) -> Self {
        Self {
            user,
            alarm,
            announcement,
        }
    }

    /// Resolve key sets from configuration
    pub fn from_config(config: &PushoverConfig) -> Self {
        let user = match config.user_key {
            KeySetting::Unset => config.group_key.resolve(&[]),
            ref setting => setting.resolve(&[]),
        };

        let alarm = config.alarm_key.resolve(&user);

        let announcement_fallback = if user.is_empty() { &alarm } else { &user };
        let announcement = config.announcement_key.resolve(announcement_fallback);

        Self::new(user, alarm, announcement)
    }

    /// Keys for a category
    pub fn keys_for(&self, category: Category) -> &[String] {
        match category {
            Category::User => &self.user,
            Category::Alarm => &self.alarm,
            Category::Announcement => &self.announcement,
        }
    }

    /// Keys a request should be delivered to
    pub fn select_keys(&self, request: &NotificationRequest) -> &[String] {
        self.keys_for(request.category())
    }

    /// Whether every key set is empty
    pub fn is_empty(&self) -> bool {
        self.user.is_empty() && self.alarm.is_empty() && self.announcement.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SeverityLevel;

    fn keys(list: &[&str]) -> Vec<String> {
        list.iter().map(|k| k.to_string()).collect()
    }

    fn config(user: KeySetting, alarm: KeySetting, announcement: KeySetting) -> PushoverConfig {
        PushoverConfig {
            user_key: user,
            alarm_key: alarm,
            announcement_key: announcement,
            ..PushoverConfig::default()
        }
    }

    #[test]
    fn test_alarm_falls_back_to_user() {
        let router = KeyRouter::from_config(&config(
            KeySetting::parse("A B"),
            KeySetting::Unset,
            KeySetting::Unset,
        ));

        assert_eq!(router.keys_for(Category::Alarm), keys(&["A", "B"]).as_slice());
    }

    #[test]
    fn test_disabled_alarm_does_not_fall_back() {
        let router = KeyRouter::from_config(&config(
            KeySetting::parse("A B"),
            KeySetting::Disabled,
            KeySetting::Unset,
        ));

        assert!(router.keys_for(Category::Alarm).is_empty());
        assert_eq!(router.keys_for(Category::User), keys(&["A", "B"]).as_slice());
    }

    #[test]
    fn test_disabled_announcement() {
        let router = KeyRouter::from_config(&config(
            KeySetting::parse("A B"),
            KeySetting::Unset,
            KeySetting::Disabled,
        ));

        assert!(router.keys_for(Category::Announcement).is_empty());
    }

    #[test]
    fn test_group_key_fallback() {
        let cfg = PushoverConfig {
            group_key: KeySetting::parse("G"),
            ..PushoverConfig::default()
        };
        let router = KeyRouter::from_config(&cfg);

        assert_eq!(router.keys_for(Category::User), keys(&["G"]).as_slice());
        assert_eq!(router.keys_for(Category::Alarm), keys(&["G"]).as_slice());
        assert_eq!(router.keys_for(Category::Announcement), keys(&["G"]).as_slice());
    }

    #[test]
    fn test_disabled_user_skips_group() {
        let cfg = PushoverConfig {
            user_key: KeySetting::Disabled,
            group_key: KeySetting::parse("G"),
            ..PushoverConfig::default()
        };
        let router = KeyRouter::from_config(&cfg);

        assert!(router.keys_for(Category::User).is_empty());
        assert!(router.is_empty());
    }

    #[test]
    fn test_announcement_falls_back_to_alarm_without_user() {
        let router = KeyRouter::from_config(&config(
            KeySetting::Unset,
            KeySetting::parse("X"),
            KeySetting::Unset,
        ));

        assert!(router.keys_for(Category::User).is_empty());
        assert_eq!(router.keys_for(Category::Announcement), keys(&["X"]).as_slice());
    }

    #[test]
    fn test_select_keys_by_request() {
        let router = KeyRouter::new(keys(&["U"]), keys(&["AL"]), keys(&["AN"]));

        let info = NotificationRequest::new(SeverityLevel::Info, "t", "m");
        let urgent = NotificationRequest::new(SeverityLevel::Urgent, "t", "m");
        let announcement = NotificationRequest::new(SeverityLevel::Info, "t", "m").announcement();

        assert_eq!(router.select_keys(&info), keys(&["U"]).as_slice());
        assert_eq!(router.select_keys(&urgent), keys(&["AL"]).as_slice());
        assert_eq!(router.select_keys(&announcement), keys(&["AN"]).as_slice());
    }
}
