//! Input validation helpers
//!
//! Centralized text length constants, field validators and the reservation
//! business rules (opening hours, closed day, no past bookings).

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use chrono_tz::Tz;

use crate::utils::{time, AppError};
use shared::date;

// ── Text length limits ──────────────────────────────────────────────

/// Guest names, table names
pub const MAX_NAME_LEN: usize = 200;

/// Phone numbers
pub const MAX_MOBILE_LEN: usize = 100;

/// Table names must be at least 2 chars ("#1" and up)
pub const MIN_TABLE_NAME_LEN: usize = 2;

// ── Opening hours ───────────────────────────────────────────────────

/// First seating: 10:30
pub const OPENING: (u32, u32) = (10, 30);

/// Last seating: 21:30 (kitchen closes an hour later)
pub const LAST_SEATING: (u32, u32) = (21, 30);

// ── Field validators ────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Party size must be a positive integer.
pub fn validate_people(people: i32) -> Result<(), AppError> {
    if people < 1 {
        return Err(AppError::validation(format!(
            "people must be at least 1 (got {people})"
        )));
    }
    Ok(())
}

/// Table capacity must be a positive integer.
pub fn validate_capacity(capacity: i32) -> Result<(), AppError> {
    if capacity < 1 {
        return Err(AppError::validation(format!(
            "capacity must be at least 1 (got {capacity})"
        )));
    }
    Ok(())
}

/// Mobile numbers must contain digits (formatting characters allowed).
pub fn validate_mobile(mobile: &str) -> Result<(), AppError> {
    validate_required_text(mobile, "mobile_number", MAX_MOBILE_LEN)?;
    if !mobile.chars().any(|c| c.is_ascii_digit()) {
        return Err(AppError::validation(format!(
            "mobile_number must contain digits: {mobile}"
        )));
    }
    Ok(())
}

// ── Business rules (reservation date/time) ──────────────────────────

/// Parse and validate a reservation date/time against the house rules:
/// not in the past, not a Tuesday (closed day), within opening hours.
///
/// Returns the parsed pair so handlers don't re-parse.
pub fn validate_reservation_slot(
    date_str: &str,
    time_str: &str,
    tz: Tz,
) -> Result<(NaiveDate, NaiveTime), AppError> {
    let date = date::parse_date(date_str).map_err(AppError::validation)?;
    let time = date::parse_time(time_str).map_err(AppError::validation)?;

    if date.weekday() == Weekday::Tue {
        return Err(AppError::validation(format!(
            "The restaurant is closed on Tuesdays ({date_str})"
        )));
    }

    let opening = NaiveTime::from_hms_opt(OPENING.0, OPENING.1, 0).unwrap();
    let last_seating = NaiveTime::from_hms_opt(LAST_SEATING.0, LAST_SEATING.1, 0).unwrap();
    if time < opening || time > last_seating {
        return Err(AppError::validation(format!(
            "reservation_time must be between {:02}:{:02} and {:02}:{:02} (got {time_str})",
            OPENING.0, OPENING.1, LAST_SEATING.0, LAST_SEATING.1
        )));
    }

    if time::is_past(date, time, tz) {
        return Err(AppError::validation(format!(
            "Reservation must be in the future: {date_str} {time_str}"
        )));
    }

    Ok((date, time))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TZ: Tz = chrono_tz::Europe::Lisbon;

    #[test]
    fn rejects_tuesday() {
        // 2099-06-02 is a Tuesday
        let err = validate_reservation_slot("2099-06-02", "18:00", TZ).unwrap_err();
        assert!(err.to_string().contains("Tuesday"));
    }

    #[test]
    fn rejects_outside_opening_hours() {
        assert!(validate_reservation_slot("2099-06-03", "09:00", TZ).is_err());
        assert!(validate_reservation_slot("2099-06-03", "22:00", TZ).is_err());
        assert!(validate_reservation_slot("2099-06-03", "10:30", TZ).is_ok());
        assert!(validate_reservation_slot("2099-06-03", "21:30", TZ).is_ok());
    }

    #[test]
    fn rejects_past_dates_and_malformed_input() {
        assert!(validate_reservation_slot("2020-06-03", "18:00", TZ).is_err());
        assert!(validate_reservation_slot("not-a-date", "18:00", TZ).is_err());
        assert!(validate_reservation_slot("2099-06-03", "6pm", TZ).is_err());
    }

    #[test]
    fn field_validators() {
        assert!(validate_people(0).is_err());
        assert!(validate_people(1).is_ok());
        assert!(validate_capacity(0).is_err());
        assert!(validate_mobile("555-0100").is_ok());
        assert!(validate_mobile("no digits here").is_err());
        assert!(validate_required_text("  ", "first_name", MAX_NAME_LEN).is_err());
    }
}
