//! Best-effort timestamp parsing for Apple Health export data.
//!
//! Records carry timestamps in several shapes depending on export vintage
//! and source app. The ladder below tries each known form in order; naive
//! values are assumed UTC by policy.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse a timestamp string into UTC, or `None` if no known form matches.
///
/// Accepted forms, in order:
/// 1. ISO-8601 ending in `Z`/`z` (either `T` or space separator)
/// 2. Apple Health canonical export format: `2024-01-20 22:58:00 -0700`
/// 3. ISO-8601 with an explicit offset
/// 4. Naive datetime or bare date, assumed UTC
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let s = value.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(stripped) = s.strip_suffix(['Z', 'z']) {
        let normalized = stripped.replacen(' ', "T", 1);
        return DateTime::parse_from_rfc3339(&format!("{normalized}+00:00"))
            .ok()
            .map(|dt| dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S %z") {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%:z") {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(DateTime::from_naive_utc_and_offset(naive, Utc));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_apple_export_format() {
        let dt = parse_timestamp("2024-01-20 22:58:00 -0700").expect("parse");
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 21, 5, 58, 0).unwrap());
    }

    #[test]
    fn parses_iso_zulu() {
        let dt = parse_timestamp("2024-01-21T05:58:00Z").expect("parse");
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 21, 5, 58, 0).unwrap());
    }

    #[test]
    fn parses_iso_with_offset() {
        let dt = parse_timestamp("2024-01-20T22:58:00-07:00").expect("parse");
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 21, 5, 58, 0).unwrap());
    }

    #[test]
    fn naive_forms_assume_utc() {
        let dt = parse_timestamp("2024-01-21 05:58:00").expect("parse");
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 21, 5, 58, 0).unwrap());

        let date_only = parse_timestamp("2024-01-21").expect("parse");
        assert_eq!(date_only, Utc.with_ymd_and_hms(2024, 1, 21, 0, 0, 0).unwrap());
    }

    #[test]
    fn garbage_and_blank_return_none() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("   ").is_none());
        assert!(parse_timestamp("not a date").is_none());
        assert!(parse_timestamp("2024-13-99T99:99:99Z").is_none());
    }
}
