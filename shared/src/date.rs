//! Calendar-date helpers — 业务时区
//!
//! Pure functions shared by the server (query validation) and the dashboard
//! client (date navigation). The viewed date is explicit input everywhere,
//! never ambient state.

use chrono::{Duration, NaiveDate, NaiveTime};
use chrono_tz::Tz;

/// Parse a date string (`YYYY-MM-DD`).
pub fn parse_date(date: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format: {date}"))
}

/// Parse a time-of-day string (`HH:MM`).
pub fn parse_time(time: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| format!("Invalid time format: {time}"))
}

/// Today's calendar date in the business timezone.
pub fn today(tz: Tz) -> NaiveDate {
    chrono::Utc::now().with_timezone(&tz).date_naive()
}

/// The calendar date one day before `date`.
pub fn previous(date: NaiveDate) -> NaiveDate {
    date - Duration::days(1)
}

/// The calendar date one day after `date`.
pub fn next(date: NaiveDate) -> NaiveDate {
    date + Duration::days(1)
}

/// `YYYY-MM-DD` render, the wire format for dates.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn previous_next_round_trip() {
        // Includes month, year and leap-day boundaries
        for d in ["2024-12-10", "2024-03-01", "2024-02-29", "2025-01-01", "2024-12-31"] {
            let date = parse_date(d).unwrap();
            assert_eq!(previous(next(date)), date);
            assert_eq!(next(previous(date)), date);
        }
    }

    #[test]
    fn next_crosses_year_boundary() {
        let date = parse_date("2024-12-31").unwrap();
        assert_eq!(format_date(next(date)), "2025-01-01");
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(parse_date("12/10/2024").is_err());
        assert!(parse_date("2024-13-01").is_err());
        assert!(parse_time("25:00").is_err());
        assert!(parse_time("6pm").is_err());
    }
}
