//! Error types for sheet documents.

use thiserror::Error;

use crate::fetch::FetchError;

/// Errors that can occur while loading or reading a sheet.
#[derive(Debug, Error)]
pub enum SheetError {
    /// The sheet could not be fetched.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The body is not valid JSON (or not a JSON object).
    #[error("malformed sheet JSON from {source_name}: {reason}")]
    Malformed {
        /// Where the document came from (URL or file name).
        source_name: String,
        /// Parser message.
        reason: String,
    },

    /// The document is JSON but not a sheet.
    #[error("Invalid sheet type: {kind}")]
    InvalidType {
        /// The `:type` value found (or `undefined`).
        kind: String,
    },

    /// A row lacks a column the caller requires.
    #[error("missing required field '{field}'")]
    MissingField {
        /// Column header.
        field: &'static str,
    },
}

impl SheetError {
    /// Creates a malformed-document error.
    pub fn malformed(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid-type error.
    pub fn invalid_type(kind: impl Into<String>) -> Self {
        Self::InvalidType { kind: kind.into() }
    }
}
