// src/calc/format.rs
//! Locale-facing display formatting for date aggregates.

use chrono::{TimeZone, Utc};

/// Format configuration for calculated date values. The defaults render the
/// en-US style the board UI shows ("July 6, 2021" / "July 6, 2021, 6:30 AM").
#[derive(Debug, Clone)]
pub struct Locale {
    pub date_format: String,
    pub datetime_format: String,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            date_format: "%B %-d, %Y".to_string(),
            datetime_format: "%B %-d, %Y, %-I:%M %p".to_string(),
        }
    }
}

impl Locale {
    /// Date-only rendering of an epoch-millisecond timestamp (UTC).
    pub fn format_date(&self, epoch_ms: i64) -> String {
        match Utc.timestamp_millis_opt(epoch_ms).single() {
            Some(datetime) => datetime.format(&self.date_format).to_string(),
            None => String::new(),
        }
    }

    /// Date and time rendering of an epoch-millisecond timestamp (UTC).
    pub fn format_date_time(&self, epoch_ms: i64) -> String {
        match Utc.timestamp_millis_opt(epoch_ms).single() {
            Some(datetime) => datetime.format(&self.datetime_format).to_string(),
            None => String::new(),
        }
    }

    /// Human-readable duration, bucketed the way the board UI humanizes
    /// ranges ("a few seconds", "2 days", "a month", ...).
    pub fn format_duration(&self, millis: i64) -> String {
        let seconds = (millis.abs() as f64 / 1000.0).round() as i64;
        if seconds < 45 {
            return "a few seconds".to_string();
        }
        if seconds < 90 {
            return "a minute".to_string();
        }
        let minutes = (seconds as f64 / 60.0).round() as i64;
        if minutes <= 44 {
            return format!("{} minutes", minutes);
        }
        if minutes <= 89 {
            return "an hour".to_string();
        }
        let hours = (minutes as f64 / 60.0).round() as i64;
        if hours <= 21 {
            return format!("{} hours", hours);
        }
        if hours <= 35 {
            return "a day".to_string();
        }
        let days = (hours as f64 / 24.0).round() as i64;
        if days <= 25 {
            return format!("{} days", days);
        }
        if days <= 45 {
            return "a month".to_string();
        }
        let months = (days as f64 / 30.4).round() as i64;
        if months <= 10 {
            return format!("{} months", months);
        }
        let years = (days as f64 / 365.25).round() as i64;
        if years <= 1 {
            "a year".to_string()
        } else {
            format!("{} years", years)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JUL_6_2021_0630_UTC: i64 = 1_625_553_000_000;

    #[test]
    fn test_format_date() {
        let locale = Locale::default();
        assert_eq!(locale.format_date(JUL_6_2021_0630_UTC), "July 6, 2021");
    }

    #[test]
    fn test_format_date_time() {
        let locale = Locale::default();
        assert_eq!(
            locale.format_date_time(JUL_6_2021_0630_UTC),
            "July 6, 2021, 6:30 AM"
        );
    }

    #[test]
    fn test_format_duration_buckets() {
        let locale = Locale::default();
        assert_eq!(locale.format_duration(10_000), "a few seconds");
        assert_eq!(locale.format_duration(60_000), "a minute");
        assert_eq!(locale.format_duration(10 * 60_000), "10 minutes");
        assert_eq!(locale.format_duration(60 * 60_000), "an hour");
        assert_eq!(locale.format_duration(5 * 3_600_000), "5 hours");
        assert_eq!(locale.format_duration(24 * 3_600_000), "a day");
        assert_eq!(locale.format_duration(2 * 86_400_000), "2 days");
        assert_eq!(locale.format_duration(30 * 86_400_000), "a month");
        assert_eq!(locale.format_duration(90 * 86_400_000), "3 months");
        assert_eq!(locale.format_duration(365 * 86_400_000), "a year");
        assert_eq!(locale.format_duration(800 * 86_400_000), "2 years");
    }

    #[test]
    fn test_custom_formats() {
        let locale = Locale {
            date_format: "%Y-%m-%d".to_string(),
            datetime_format: "%Y-%m-%d %H:%M".to_string(),
        };
        assert_eq!(locale.format_date(JUL_6_2021_0630_UTC), "2021-07-06");
        assert_eq!(
            locale.format_date_time(JUL_6_2021_0630_UTC),
            "2021-07-06 06:30"
        );
    }
}
