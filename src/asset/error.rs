//! Error types for date handling.

use thiserror::Error;

/// Errors raised by date validation and parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// The string does not match `D/M/YYYY`.
    #[error("Invalid date format: {value}")]
    Format {
        /// The offending input.
        value: String,
    },

    /// The string matches the pattern but names no calendar day (e.g. 31/2/2024).
    #[error("Invalid calendar date: {value}")]
    Calendar {
        /// The offending input.
        value: String,
    },
}

impl DateError {
    /// Creates a format error.
    #[must_use]
    pub fn format(value: &str) -> Self {
        Self::Format {
            value: value.to_string(),
        }
    }

    /// Creates a calendar error.
    #[must_use]
    pub fn calendar(value: &str) -> Self {
        Self::Calendar {
            value: value.to_string(),
        }
    }
}
