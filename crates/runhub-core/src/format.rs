//! Display formatting.

use chrono::{DateTime, TimeZone, Utc};

/// `MM/dd/yyyy HH:mm`
pub const DATE_TIME_FORMAT: &str = "%m/%d/%Y %H:%M";

/// Format an epoch-millisecond timestamp in the given timezone.
pub fn format_millis_in<Tz: TimeZone>(millis: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(dt) => dt.with_timezone(tz).format(DATE_TIME_FORMAT).to_string(),
        None => millis.to_string(),
    }
}

pub fn format_millis(millis: i64) -> String {
    format_millis_in(millis, &Utc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_millis() {
        // 2023-03-14 09:26:53 UTC
        assert_eq!(format_millis(1_678_786_013_000), "03/14/2023 09:26");
        assert_eq!(format_millis(0), "01/01/1970 00:00");
    }

    #[test]
    fn test_out_of_range_falls_back_to_raw_value() {
        assert_eq!(format_millis(i64::MAX), i64::MAX.to_string());
    }

    #[test]
    fn test_format_in_fixed_offset() {
        let ist = chrono::FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
        assert_eq!(format_millis_in(1_678_786_013_000, &ist), "03/14/2023 14:56");

        let pst = chrono::FixedOffset::west_opt(8 * 3600).unwrap();
        assert_eq!(format_millis_in(0, &pst), "12/31/1969 16:00");
    }
}
