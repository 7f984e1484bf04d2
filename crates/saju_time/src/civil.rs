//! Civil birth date and hour parsing.
//!
//! Birth hours arrive as fractional hours of day (`13.5` = 13:30). The
//! fraction is carried down to whole seconds.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::TimeError;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Accepted date layouts, tried in order.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%Y%m%d"];

/// Parse a civil birth date.
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, `YYYY.MM.DD`, `YYYYMMDD`, or an ISO
/// date-time whose leading ten characters are a date.
pub fn parse_birth_date(input: &str) -> Result<NaiveDate, TimeError> {
    let trimmed = input.trim();
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Ok(date);
        }
    }
    trimmed
        .get(..10)
        .filter(|_| trimmed.len() > 10)
        .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
        .ok_or_else(|| TimeError::InvalidDate(trimmed.to_string()))
}

/// A parsed date, or today's local date when parsing fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDate {
    pub date: NaiveDate,
    /// Today's date was substituted for unparseable input.
    pub substituted: bool,
}

/// Parse a birth date, substituting today's date for unparseable input.
pub fn parse_birth_date_or_today(input: &str) -> ParsedDate {
    match parse_birth_date(input) {
        Ok(date) => ParsedDate {
            date,
            substituted: false,
        },
        Err(_) => ParsedDate {
            date: Local::now().date_naive(),
            substituted: true,
        },
    }
}

/// Convert a fractional hour in `[0, 24)` to a time of day, rounded to the second.
pub fn hour_to_time(hour: f64) -> Result<NaiveTime, TimeError> {
    if !hour.is_finite() || !(0.0..24.0).contains(&hour) {
        return Err(TimeError::InvalidHour(hour));
    }
    let secs = (hour * SECONDS_PER_HOUR).round() as u32;
    // 23:59:59.6 rounds to 86400 s; clamp to the last second of the day.
    let secs = secs.min(86_399);
    NaiveTime::from_num_seconds_from_midnight_opt(secs, 0).ok_or(TimeError::InvalidHour(hour))
}

/// Combine a date and a fractional hour.
pub fn civil_datetime(date: NaiveDate, hour: f64) -> Result<NaiveDateTime, TimeError> {
    Ok(date.and_time(hour_to_time(hour)?))
}

/// Fractional hour of day of a date-time.
pub fn fractional_hour(dt: &NaiveDateTime) -> f64 {
    dt.time().num_seconds_from_midnight() as f64 / SECONDS_PER_HOUR
}

/// Round to the nearest minute; 30 seconds and above round up.
pub fn round_to_minute(dt: NaiveDateTime) -> NaiveDateTime {
    let secs = dt.second();
    let truncated = dt
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(dt);
    if secs >= 30 {
        truncated + Duration::minutes(1)
    } else {
        truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_layouts() {
        let expected = date(2023, 10, 2);
        for s in ["2023-10-02", "2023/10/02", "2023.10.02", "20231002", " 2023-10-02 "] {
            assert_eq!(parse_birth_date(s).unwrap(), expected, "{s}");
        }
        assert_eq!(parse_birth_date("2023-10-02T12:00:00").unwrap(), expected);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            parse_birth_date("not a date"),
            Err(TimeError::InvalidDate(_))
        ));
        assert!(parse_birth_date("2023-02-30").is_err());
    }

    #[test]
    fn unparseable_date_becomes_today() {
        let parsed = parse_birth_date_or_today("garbage");
        assert!(parsed.substituted);
        let parsed = parse_birth_date_or_today("1990-05-15");
        assert!(!parsed.substituted);
        assert_eq!(parsed.date, date(1990, 5, 15));
    }

    #[test]
    fn fractional_hours() {
        assert_eq!(hour_to_time(13.5).unwrap(), NaiveTime::from_hms_opt(13, 30, 0).unwrap());
        assert_eq!(hour_to_time(0.0).unwrap(), NaiveTime::from_hms_opt(0, 0, 0).unwrap());
        assert_eq!(
            hour_to_time(23.999_999).unwrap(),
            NaiveTime::from_hms_opt(23, 59, 59).unwrap()
        );
    }

    #[test]
    fn hour_out_of_range() {
        assert!(hour_to_time(24.0).is_err());
        assert!(hour_to_time(-0.5).is_err());
        assert!(hour_to_time(f64::NAN).is_err());
    }

    #[test]
    fn minute_rounding() {
        let base = date(2000, 1, 1);
        let up = base.and_hms_opt(10, 15, 30).unwrap();
        let down = base.and_hms_opt(10, 15, 29).unwrap();
        assert_eq!(round_to_minute(up), base.and_hms_opt(10, 16, 0).unwrap());
        assert_eq!(round_to_minute(down), base.and_hms_opt(10, 15, 0).unwrap());
        let midnight = base.and_hms_opt(23, 59, 45).unwrap();
        assert_eq!(round_to_minute(midnight), date(2000, 1, 2).and_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn fractional_hour_roundtrip() {
        let dt = civil_datetime(date(2000, 1, 1), 7.25).unwrap();
        assert!((fractional_hour(&dt) - 7.25).abs() < 1e-12);
    }
}
