//! Date/time utilities.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Format used when a configured format string cannot be rendered.
pub const DEFAULT_FORMAT: &str = "%d.%m.%Y, %H:%M:%S";

/// Source of the current time.
///
/// Injected into the contact service so rendered messages are reproducible
/// in tests.
pub trait Clock: Send + Sync {
    /// Current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Format a DateTime<Utc> in the specified timezone.
///
/// # Arguments
///
/// * `dt` - DateTime in UTC
/// * `timezone` - Timezone name (e.g., "Europe/Moscow", "UTC")
/// * `format` - chrono format string (e.g., "%d.%m.%Y, %H:%M:%S")
///
/// Unknown timezones fall back to UTC and malformed format strings fall
/// back to [`DEFAULT_FORMAT`].
pub fn format_utc_datetime(dt: &DateTime<Utc>, timezone: &str, format: &str) -> String {
    let format = if is_valid_format(format) {
        format
    } else {
        DEFAULT_FORMAT
    };

    match timezone.parse::<Tz>() {
        Ok(tz) => dt.with_timezone(&tz).format(format).to_string(),
        Err(_) => dt.format(format).to_string(),
    }
}

/// Check that a chrono format string contains only known specifiers.
///
/// chrono panics when rendering a malformed format through `to_string`.
pub fn is_valid_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_utc_datetime() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let result = format_utc_datetime(&dt, "Europe/Moscow", "%d.%m.%Y, %H:%M:%S");
        assert_eq!(result, "15.01.2024, 13:30:00"); // UTC+3
    }

    #[test]
    fn test_format_utc_datetime_utc() {
        let dt = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        let result = format_utc_datetime(&dt, "UTC", "%Y/%m/%d %H:%M");
        assert_eq!(result, "2024/12/31 23:59");
    }

    #[test]
    fn test_format_utc_datetime_invalid_timezone() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let result = format_utc_datetime(&dt, "Invalid/Zone", "%Y/%m/%d %H:%M");
        assert_eq!(result, "2024/01/15 10:30");
    }

    #[test]
    fn test_fixed_clock() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let clock = FixedClock(dt);
        assert_eq!(clock.now(), dt);
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_is_valid_format() {
        assert!(is_valid_format("%d.%m.%Y, %H:%M:%S"));
        assert!(is_valid_format("%Y-%m-%d %H:%M"));
        assert!(is_valid_format("plain text"));
        assert!(!is_valid_format("%d.%m.%Y %Q"));
        assert!(!is_valid_format("%"));
    }

    #[test]
    fn test_format_utc_datetime_invalid_format() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let result = format_utc_datetime(&dt, "Europe/Moscow", "%d.%m.%Y %Q");
        assert_eq!(result, "15.01.2024, 13:30:00");
    }
}
