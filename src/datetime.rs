/// Pure date/time utility functions
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, Utc};

/// Check if a given year is a leap year
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Get the current local date as (month, day, year)
pub fn current_date() -> (i32, i32, i32) {
    let now = Local::now();
    (now.month() as i32, now.day() as i32, now.year())
}

/// Get month name from month number (1-12)
pub fn month_name(month: i32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

/// Parse an ISO-ish timestamp string and tag it as UTC.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS`, and a
/// bare `YYYY-MM-DD` (taken as midnight). Returns `None` when no format
/// matches.
pub fn parse_utc_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_is_leap_year() {
        assert!(is_leap_year(2000)); // Divisible by 400
        assert!(is_leap_year(2020)); // Divisible by 4, not by 100
        assert!(is_leap_year(2024));

        assert!(!is_leap_year(1900)); // Divisible by 100, not by 400
        assert!(!is_leap_year(2100));
        assert!(!is_leap_year(2023)); // Not divisible by 4
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(5), "May");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(0), "Unknown");
        assert_eq!(month_name(13), "Unknown");
    }

    #[test]
    fn test_current_date_in_range() {
        let (month, day, year) = current_date();
        assert!((1..=12).contains(&month));
        assert!((1..=31).contains(&day));
        assert!(year >= 2024);
    }

    #[test]
    fn test_parse_utc_timestamp_space_separated() {
        let expected = Utc.with_ymd_and_hms(2021, 5, 5, 5, 5, 5).unwrap();
        assert_eq!(parse_utc_timestamp("2021-05-05 05:05:05"), Some(expected));
    }

    #[test]
    fn test_parse_utc_timestamp_t_separated() {
        let expected = Utc.with_ymd_and_hms(2021, 5, 5, 5, 5, 5).unwrap();
        assert_eq!(parse_utc_timestamp("2021-05-05T05:05:05"), Some(expected));
    }

    #[test]
    fn test_parse_utc_timestamp_rfc3339_converts_offset() {
        let expected = Utc.with_ymd_and_hms(2021, 5, 5, 3, 5, 5).unwrap();
        assert_eq!(
            parse_utc_timestamp("2021-05-05T05:05:05+02:00"),
            Some(expected)
        );
    }

    #[test]
    fn test_parse_utc_timestamp_bare_date() {
        let expected = Utc.with_ymd_and_hms(2021, 5, 5, 0, 0, 0).unwrap();
        assert_eq!(parse_utc_timestamp("2021-05-05"), Some(expected));
    }

    #[test]
    fn test_parse_utc_timestamp_rejects_garbage() {
        assert_eq!(parse_utc_timestamp("next tuesday"), None);
        assert_eq!(parse_utc_timestamp(""), None);
    }
}
