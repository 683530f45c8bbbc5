// Settings module
// User-facing configuration persisted as TOML

use serde::{Deserialize, Serialize};

/// Application settings.
///
/// `day_start_hour..day_end_hour` is the visible schedule window for the
/// week/day views; drops outside it are invalid targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// 0 = Sunday, 1 = Monday, etc.
    pub first_day_of_week: u8,
    pub day_start_hour: u32,
    pub day_end_hour: u32,
    /// Height of one grid row in minutes (60 = hourly rows).
    pub slot_minutes: u32,
    pub dark_theme: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            first_day_of_week: 1,
            day_start_hour: 8,
            day_end_hour: 22,
            slot_minutes: 60,
            dark_theme: true,
        }
    }
}

impl Settings {
    /// Clamp nonsensical values back to usable defaults after deserializing
    /// a hand-edited config file.
    pub fn sanitized(mut self) -> Self {
        if self.first_day_of_week > 6 {
            self.first_day_of_week = 1;
        }
        if self.day_end_hour > 24 {
            self.day_end_hour = 24;
        }
        if self.day_start_hour >= self.day_end_hour {
            let defaults = Settings::default();
            self.day_start_hour = defaults.day_start_hour;
            self.day_end_hour = defaults.day_end_hour;
        }
        if self.slot_minutes == 0 {
            self.slot_minutes = 60;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.first_day_of_week, 1);
        assert_eq!(settings.day_start_hour, 8);
        assert_eq!(settings.day_end_hour, 22);
        assert_eq!(settings.slot_minutes, 60);
    }

    #[test]
    fn test_sanitized_fixes_inverted_window() {
        let settings = Settings {
            day_start_hour: 23,
            day_end_hour: 6,
            ..Settings::default()
        }
        .sanitized();

        assert!(settings.day_start_hour < settings.day_end_hour);
    }

    #[test]
    fn test_sanitized_fixes_zero_slot() {
        let settings = Settings {
            slot_minutes: 0,
            ..Settings::default()
        }
        .sanitized();

        assert_eq!(settings.slot_minutes, 60);
    }

    #[test]
    fn test_round_trips_through_toml() {
        let settings = Settings {
            first_day_of_week: 0,
            dark_theme: false,
            ..Settings::default()
        };
        let text = toml::to_string(&settings).unwrap();
        let back: Settings = toml::from_str(&text).unwrap();
        assert_eq!(back, settings);
    }
}
