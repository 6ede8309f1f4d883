//! Planned-duration handling.
//!
//! The trip provider reports planned journey durations as "H:MM" strings
//! ("0:45", "1:10", "12:05"). Hours have no fixed width; minutes are always
//! two digits. This module converts between those strings and whole minutes.

/// Error returned when parsing an invalid planned-duration string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid planned duration: {reason}")]
pub struct DurationError {
    reason: &'static str,
}

impl DurationError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Parse a planned duration in "H:MM" format into whole minutes.
///
/// # Examples
///
/// ```
/// use traveltime_collector::domain::parse_planned_minutes;
///
/// assert_eq!(parse_planned_minutes("0:00").unwrap(), 0);
/// assert_eq!(parse_planned_minutes("0:45").unwrap(), 45);
/// assert_eq!(parse_planned_minutes("1:10").unwrap(), 70);
/// assert_eq!(parse_planned_minutes("12:05").unwrap(), 725);
///
/// assert!(parse_planned_minutes("45").is_err());
/// assert!(parse_planned_minutes("1:5").is_err());
/// assert!(parse_planned_minutes("1:60").is_err());
/// ```
pub fn parse_planned_minutes(s: &str) -> Result<u32, DurationError> {
    let (hours, minutes) = s
        .split_once(':')
        .ok_or_else(|| DurationError::new("expected H:MM format"))?;

    if hours.is_empty() || !hours.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DurationError::new("invalid hour digits"));
    }

    if minutes.len() != 2 || !minutes.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DurationError::new("minutes must be two digits"));
    }

    let hours: u32 = hours
        .parse()
        .map_err(|_| DurationError::new("hour out of range"))?;
    let minutes: u32 = minutes
        .parse()
        .map_err(|_| DurationError::new("invalid minute digits"))?;

    if minutes > 59 {
        return Err(DurationError::new("minute must be 0-59"));
    }

    hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .ok_or_else(|| DurationError::new("duration out of range"))
}

/// Format whole minutes back into "H:MM".
///
/// # Examples
///
/// ```
/// use traveltime_collector::domain::format_planned_minutes;
///
/// assert_eq!(format_planned_minutes(0), "0:00");
/// assert_eq!(format_planned_minutes(45), "0:45");
/// assert_eq!(format_planned_minutes(70), "1:10");
/// ```
pub fn format_planned_minutes(minutes: u32) -> String {
    format!("{}:{:02}", minutes / 60, minutes % 60)
}
