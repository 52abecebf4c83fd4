//! Free-form header dates to epoch milliseconds, and the push-time format.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone};

/// Format written to `EvernoteUpdate`.
pub const PUSH_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Lead of the push stamp past the push itself; the write-back lands
/// well before the truncated minute.
const PUSH_LEAD_SECS: i64 = 65;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d.%m.%Y %H:%M",
];

// Slash dates are month first when the year comes last.
const NAIVE_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y", "%B %d, %Y", "%b %d, %Y", "%d %B %Y",
    "%d %b %Y",
];

/// Parse a header date into epoch milliseconds.
///
/// Zoned forms (RFC 3339, RFC 2822) keep their offset; naive forms are read
/// as local time, the same clock `EvernoteUpdate` is written in.
pub fn parse_timestamp(value: &str) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.timestamp_millis());
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(value) {
        return Some(parsed.timestamp_millis());
    }

    let naive = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NAIVE_DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.timestamp_millis())
}

/// `EvernoteUpdate` value for a push made at `now`: about a minute ahead, so
/// the file just rewritten does not look newer than its own push.
///
/// The stamp has minute precision and is always at least five seconds
/// after `now`.
pub fn format_push_time(now: DateTime<Local>) -> String {
    (now + TimeDelta::seconds(PUSH_LEAD_SECS))
        .format(PUSH_TIME_FORMAT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_ms(y: i32, m: u32, d: u32, h: u32, min: u32) -> i64 {
        Local
            .with_ymd_and_hms(y, m, d, h, min, 0)
            .earliest()
            .expect("valid local time")
            .timestamp_millis()
    }

    #[test]
    fn test_parse_push_time_format() {
        assert_eq!(
            parse_timestamp("2023-01-01 00:00"),
            Some(local_ms(2023, 1, 1, 0, 0))
        );
    }

    #[test]
    fn test_parse_date_only_is_local_midnight() {
        assert_eq!(parse_timestamp("2023-06-01"), Some(local_ms(2023, 6, 1, 0, 0)));
        assert_eq!(parse_timestamp("2023/06/01"), Some(local_ms(2023, 6, 1, 0, 0)));
        assert_eq!(
            parse_timestamp("June 1, 2023"),
            Some(local_ms(2023, 6, 1, 0, 0))
        );
    }

    #[test]
    fn test_parse_month_first_slash_date() {
        assert_eq!(parse_timestamp("06/01/2023"), Some(local_ms(2023, 6, 1, 0, 0)));
        assert_eq!(
            parse_timestamp("06/01/2023 10:30"),
            Some(local_ms(2023, 6, 1, 10, 30))
        );
    }

    #[test]
    fn test_parse_fractional_seconds() {
        assert_eq!(
            parse_timestamp("2023-06-01 10:00:00.5"),
            Some(local_ms(2023, 6, 1, 10, 0) + 500)
        );
        assert_eq!(
            parse_timestamp("2023-06-01T10:00:00.250"),
            Some(local_ms(2023, 6, 1, 10, 0) + 250)
        );
    }

    #[test]
    fn test_parse_rfc3339_keeps_offset() {
        assert_eq!(
            parse_timestamp("2023-06-01T12:00:00Z"),
            Some(1_685_620_800_000)
        );
        assert_eq!(
            parse_timestamp("2023-06-01T14:00:00+02:00"),
            Some(1_685_620_800_000)
        );
    }

    #[test]
    fn test_parse_rfc2822() {
        assert_eq!(
            parse_timestamp("Thu, 01 Jun 2023 12:00:00 +0000"),
            Some(1_685_620_800_000)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("   "), None);
        assert_eq!(parse_timestamp("next tuesday"), None);
        assert_eq!(parse_timestamp("2023-13-45"), None);
    }

    #[test]
    fn test_format_push_time_adds_one_minute() {
        let now = Local
            .with_ymd_and_hms(2024, 1, 31, 23, 59, 30)
            .earliest()
            .expect("valid local time");
        assert_eq!(format_push_time(now), "2024-02-01 00:00");
    }

    #[test]
    fn test_push_time_has_margin_at_end_of_minute() {
        let now = Local
            .with_ymd_and_hms(2024, 1, 31, 10, 0, 59)
            .earliest()
            .expect("valid local time")
            + TimeDelta::milliseconds(999);
        let pushed = parse_timestamp(&format_push_time(now)).expect("push time parses");
        assert!(pushed >= now.timestamp_millis() + 5_000);
    }

    #[test]
    fn test_push_time_is_after_now() {
        let now = Local::now();
        let pushed = parse_timestamp(&format_push_time(now)).expect("push time parses");
        assert!(pushed > now.timestamp_millis());
    }
}
