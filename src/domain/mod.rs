//! Domain models for bgnotify
//!
//! This module contains all domain types with validation.
//! Types are validated on construction (fail-fast pattern).

pub mod level;
pub mod notification;
pub mod reading;

pub use level::{Priority, SeverityLevel};
pub use notification::{Category, NotificationRequest, Receipt};
pub use reading::Reading;
