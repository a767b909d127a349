//! `D/M/YYYY` date validation and the active-window check.

use std::sync::LazyLock;

use chrono::{Months, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

use super::error::DateError;

/// Years added to "now" when an item has no end date.
pub const END_DATE_DEFAULT_YEARS: u32 = 10;

/// Day 1-31, month 1-12 (leading zero optional), four digit year.
#[allow(clippy::expect_used)]
static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0?[1-9]|[1-2][0-9]|3[0-1])/(0?[1-9]|1[0-2])/([0-9]{4})$")
        .expect("date regex is valid") // Static pattern, safe to panic
});

/// Validates a sheet date cell.
///
/// Only the empty string is valid without matching; it means "no constraint".
/// The value is matched as given, so padded input is rejected.
///
/// # Errors
///
/// Returns [`DateError::Format`] for any other string that is not `D/M/YYYY`.
///
/// # Examples
///
/// ```
/// use recognitions_core::asset::validate_date_format;
///
/// assert!(validate_date_format("1/1/2024").is_ok());
/// assert!(validate_date_format("").is_ok());
/// assert!(validate_date_format("2024/1/1").is_err());
/// ```
pub fn validate_date_format(value: &str) -> Result<(), DateError> {
    if value.is_empty() || DATE_PATTERN.is_match(value) {
        Ok(())
    } else {
        Err(DateError::format(value))
    }
}

/// Parses a `D/M/YYYY` string into a calendar date.
///
/// # Errors
///
/// Returns [`DateError::Format`] when the pattern does not match (including
/// empty input) and [`DateError::Calendar`] when the day does not exist.
pub fn parse_date(value: &str) -> Result<NaiveDate, DateError> {
    let trimmed = value.trim();
    let captures = DATE_PATTERN
        .captures(trimmed)
        .ok_or_else(|| DateError::format(value))?;

    let number = |index: usize| -> Result<u32, DateError> {
        captures[index]
            .parse::<u32>()
            .map_err(|_| DateError::format(value))
    };
    let day = number(1)?;
    let month = number(2)?;
    let year = i32::try_from(number(3)?).map_err(|_| DateError::format(value))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| DateError::calendar(value))
}

/// The interval during which a carousel item may be shown.
///
/// Bounds are local midnight of the given day. A missing start means "now",
/// a missing end means "now + 10 years". A bound that fails to parse makes
/// the window permanently inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    valid: bool,
}

impl DateWindow {
    /// Builds a window from the raw `start-date` / `end-date` attribute values.
    #[must_use]
    pub fn from_attributes(start: Option<&str>, end: Option<&str>) -> Self {
        let mut valid = true;
        let mut bound = |raw: Option<&str>| -> Option<NaiveDateTime> {
            let raw = raw.map(str::trim).filter(|value| !value.is_empty())?;
            match parse_date(raw) {
                Ok(date) => Some(date.and_time(NaiveTime::MIN)),
                Err(_) => {
                    valid = false;
                    None
                }
            }
        };
        let start = bound(start);
        let end = bound(end);
        Self { start, end, valid }
    }

    /// A window with no constraints (always active).
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
            valid: true,
        }
    }

    /// Returns true when `start <= now <= end`.
    #[must_use]
    pub fn contains(&self, now: NaiveDateTime) -> bool {
        if !self.valid {
            return false;
        }
        let start = self.start.unwrap_or(now);
        let end = self.end.unwrap_or_else(|| {
            now.checked_add_months(Months::new(END_DATE_DEFAULT_YEARS * 12))
                .unwrap_or(NaiveDateTime::MAX)
        });
        start <= now && now <= end
    }

    /// Returns true when the window has an explicit end date.
    #[must_use]
    pub fn has_end(&self) -> bool {
        self.end.is_some()
    }
}
