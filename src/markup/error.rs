//! Error types for markup reading.

use thiserror::Error;

use crate::asset::DateError;

/// A row or block lacks the sub-structure it is expected to carry.
///
/// These errors are logged and the offending row skipped; they never abort
/// extraction of sibling rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    /// Expected element absent from a row.
    #[error("row {row}: missing {expected}")]
    StructuralMismatch {
        /// Zero-based row index in document order.
        row: usize,
        /// What was expected (e.g. "link anchor").
        expected: &'static str,
    },

    /// Link present but not resolvable to a URL.
    #[error("row {row}: invalid link '{href}'")]
    InvalidLink {
        /// Zero-based row index in document order.
        row: usize,
        /// The raw href.
        href: String,
    },

    /// A date cell is not `D/M/YYYY`.
    #[error("row {row}: {source}")]
    InvalidDate {
        /// Zero-based row index in document order.
        row: usize,
        /// The validation failure.
        #[source]
        source: DateError,
    },
}

impl MarkupError {
    /// Creates a structural mismatch error.
    #[must_use]
    pub fn missing(row: usize, expected: &'static str) -> Self {
        Self::StructuralMismatch { row, expected }
    }

    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(row: usize, source: DateError) -> Self {
        Self::InvalidDate { row, source }
    }
}
