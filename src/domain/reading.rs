//! Sensor reading types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, SystemTime};

/// A single glucose reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Raw sensor value in mg/dL
    pub mgdl: f64,
    /// Value converted to display units
    pub scaled: f64,
    /// When the sensor captured the value
    pub captured_at: SystemTime,
}

impl Reading {
    /// Create a reading whose display units are mg/dL
    pub fn new(mgdl: f64, captured_at: SystemTime) -> Self {
        Self {
            mgdl,
            scaled: mgdl,
            captured_at,
        }
    }

    /// Set a scaled value distinct from the raw one
    pub fn with_scaled(mut self, scaled: f64) -> Self {
        self.scaled = scaled;
        self
    }

    /// Age of the reading at `now`
    ///
    /// Readings stamped in the future have an age of zero.
    pub fn age(&self, now: SystemTime) -> Duration {
        now.duration_since(self.captured_at).unwrap_or_default()
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} mg/dL)", self.scaled, self.mgdl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_defaults_scaled_to_raw() {
        let reading = Reading::new(142.0, SystemTime::now());
        assert_eq!(reading.scaled, 142.0);
    }

    #[test]
    fn test_reading_age() {
        let now = SystemTime::now();
        let reading = Reading::new(100.0, now - Duration::from_secs(300));
        assert_eq!(reading.age(now), Duration::from_secs(300));
    }

    #[test]
    fn test_future_reading_has_zero_age() {
        let now = SystemTime::now();
        let reading = Reading::new(100.0, now + Duration::from_secs(60));
        assert_eq!(reading.age(now), Duration::ZERO);
    }
}
