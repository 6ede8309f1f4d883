//! Departure timestamp type.

use std::fmt;

use chrono::NaiveDateTime;

/// Error returned when parsing an invalid departure timestamp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid departure time {input:?}: expected DD-MM-YYYY hh:mm")]
pub struct InvalidDepartureTime {
    input: String,
}

/// A validated departure timestamp in the provider's wire format.
///
/// The trip endpoint takes times as "DD-MM-YYYY hh:mm" strings. This type
/// validates the format at construction and keeps the original string for
/// the query, so a malformed timestamp fails fast instead of producing
/// confusing provider errors mid-run.
///
/// # Examples
///
/// ```
/// use traveltime_collector::domain::DepartureTime;
///
/// let t = DepartureTime::parse("14-04-2026 08:30").unwrap();
/// assert_eq!(t.as_str(), "14-04-2026 08:30");
///
/// assert!(DepartureTime::parse("2026-04-14 08:30").is_err());
/// assert!(DepartureTime::parse("14-04-2026").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartureTime {
    raw: String,
    datetime: NaiveDateTime,
}

impl DepartureTime {
    /// Parse a departure timestamp from "DD-MM-YYYY hh:mm".
    pub fn parse(s: &str) -> Result<Self, InvalidDepartureTime> {
        let datetime = NaiveDateTime::parse_from_str(s, "%d-%m-%Y %H:%M").map_err(|_| {
            InvalidDepartureTime {
                input: s.to_string(),
            }
        })?;

        Ok(Self {
            raw: s.to_string(),
            datetime,
        })
    }

    /// Returns the wire-format string.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the parsed timestamp.
    pub fn datetime(&self) -> NaiveDateTime {
        self.datetime
    }
}

impl fmt::Display for DepartureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
