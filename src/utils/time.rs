use chrono::{Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Format used by form fields and the event extractor (`YYYY-MM-DDTHH:mm`)
pub const LOCAL_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Compact UTC format expected by the calendar `dates` parameter
pub const GCAL_DATETIME_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Default event length when no end time is known
pub const DEFAULT_EVENT_MINUTES: i64 = 60;

/// Build a datetime from loose numeric parts, rejecting impossible dates
pub fn datetime_from_parts(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0)
}

/// Parse a local datetime, with or without seconds
pub fn parse_local_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, LOCAL_DATETIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
}

/// Render a datetime as a local datetime string truncated to minutes
pub fn format_local_datetime(dt: &NaiveDateTime) -> String {
    dt.format(LOCAL_DATETIME_FORMAT).to_string()
}

/// Default end time for an event starting at `start`
pub fn default_end(start: &str) -> Option<String> {
    let start = parse_local_datetime(start)?;
    let end = start.checked_add_signed(Duration::minutes(DEFAULT_EVENT_MINUTES))?;
    Some(format_local_datetime(&end))
}

/// Convert a local datetime in `tz` to the compact UTC calendar form.
///
/// Returns an empty string when the input cannot be parsed or names a local
/// time that does not exist in `tz`. Callers must treat the empty string as a
/// format error and refuse to build a link from it.
pub fn to_gcal_datetime(local: &str, tz: Tz) -> String {
    let Some(naive) = parse_local_datetime(local) else {
        return String::new();
    };

    let localized = match tz.from_local_datetime(&naive) {
        chrono::LocalResult::Single(dt) => dt,
        chrono::LocalResult::Ambiguous(earliest, _) => earliest,
        chrono::LocalResult::None => return String::new(),
    };

    localized
        .with_timezone(&Utc)
        .format(GCAL_DATETIME_FORMAT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_gcal_shape(value: &str) -> bool {
        let bytes = value.as_bytes();
        bytes.len() == 16
            && bytes[..8].iter().all(u8::is_ascii_digit)
            && bytes[8] == b'T'
            && bytes[9..15].iter().all(u8::is_ascii_digit)
            && bytes[15] == b'Z'
    }

    #[test]
    fn test_parse_local_datetime() {
        let dt = parse_local_datetime("2024-03-15T14:30").unwrap();
        assert_eq!(format_local_datetime(&dt), "2024-03-15T14:30");

        // Seconds are accepted and dropped on output
        let dt = parse_local_datetime("2024-03-15T14:30:59").unwrap();
        assert_eq!(format_local_datetime(&dt), "2024-03-15T14:30");

        assert!(parse_local_datetime("not-a-date").is_none());
        assert!(parse_local_datetime("2024-02-30T10:00").is_none());
        assert!(parse_local_datetime("").is_none());
    }

    #[test]
    fn test_datetime_from_parts() {
        assert!(datetime_from_parts(2024, 2, 29, 9, 5).is_some());
        assert!(datetime_from_parts(2023, 2, 29, 9, 5).is_none());
        assert!(datetime_from_parts(2024, 13, 1, 9, 5).is_none());
        assert!(datetime_from_parts(2024, 1, 1, 24, 0).is_none());
    }

    #[test]
    fn test_default_end() {
        assert_eq!(
            default_end("2024-03-15T14:30").as_deref(),
            Some("2024-03-15T15:30")
        );
        // Rolls over midnight and month end
        assert_eq!(
            default_end("2024-03-31T23:30").as_deref(),
            Some("2024-04-01T00:30")
        );
        assert_eq!(default_end("garbage"), None);
    }

    #[test]
    fn test_to_gcal_datetime_tokyo() {
        let value = to_gcal_datetime("2024-03-15T14:30", chrono_tz::Asia::Tokyo);
        assert_eq!(value, "20240315T053000Z");
        assert!(is_gcal_shape(&value));
    }

    #[test]
    fn test_to_gcal_datetime_utc() {
        let value = to_gcal_datetime("2024-03-15T14:30", chrono_tz::UTC);
        assert_eq!(value, "20240315T143000Z");
    }

    #[test]
    fn test_to_gcal_datetime_truncates_subseconds() {
        let value = to_gcal_datetime("2024-03-15T14:30:15.250", chrono_tz::UTC);
        assert_eq!(value, "20240315T143015Z");
    }

    #[test]
    fn test_to_gcal_datetime_invalid() {
        assert_eq!(to_gcal_datetime("not-a-date", chrono_tz::UTC), "");
        assert_eq!(to_gcal_datetime("", chrono_tz::Asia::Tokyo), "");
    }

    #[test]
    fn test_to_gcal_datetime_dst_gap() {
        // 02:30 does not exist in New York on 2024-03-10
        let value = to_gcal_datetime("2024-03-10T02:30", chrono_tz::America::New_York);
        assert_eq!(value, "");
    }
}
