//! Typed view over a sheet JSON document.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::SheetError;

/// Column headers used by recognitions sheets.
pub mod columns {
    /// Explicit image for the entry.
    pub const IMAGE_URL: &str = "Image URL";
    /// Comma separated employee ids used to derive profile photos.
    pub const LDAP: &str = "LDAP";
    /// `D/M/YYYY` first day the entry is shown.
    pub const START_DATE: &str = "Start Date";
    /// `D/M/YYYY` day the entry stops being shown.
    pub const END_DATE: &str = "End Date";
    /// Body text.
    pub const DESCRIPTION: &str = "Description";
    /// Comma separated display names, aligned with the images.
    pub const NAME: &str = "Name";
    /// Heading override (`no heading` suppresses it).
    pub const HEADING: &str = "Heading";
    /// Title shown above the figures.
    pub const TITLE: &str = "Title";
}

const SHEET_TYPE: &str = "sheet";

/// One data row of a sheet, keyed by column header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SheetEntry(HashMap<String, Value>);

impl SheetEntry {
    /// Returns the trimmed cell text, or `None` when the cell is absent or blank.
    ///
    /// Numbers and booleans are rendered as text; `null`, arrays and objects
    /// count as absent.
    #[must_use]
    pub fn field(&self, column: &str) -> Option<String> {
        let text = match self.0.get(column)? {
            Value::String(value) => value.trim().to_string(),
            Value::Number(value) => value.to_string(),
            Value::Bool(value) => value.to_string(),
            Value::Null | Value::Array(_) | Value::Object(_) => return None,
        };
        (!text.is_empty()).then_some(text)
    }

    /// Returns the cell text, or [`SheetError::MissingField`] when absent.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::MissingField` if the column is absent or blank.
    pub fn required(&self, column: &'static str) -> Result<String, SheetError> {
        self.field(column)
            .ok_or(SheetError::MissingField { field: column })
    }

    /// Builds an entry from column/value pairs.
    #[must_use]
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
                .collect(),
        )
    }
}

/// A sheet document as delivered by the sheet API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetDocument {
    /// Document kind; only `sheet` is accepted.
    #[serde(rename = ":type", default)]
    pub kind: Option<String>,
    /// Total row count reported by the API.
    #[serde(default)]
    pub total: Option<u64>,
    /// Data rows.
    #[serde(default)]
    pub data: Vec<SheetEntry>,
}

impl SheetDocument {
    /// Parses a sheet body.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::Malformed` when the body is not a JSON object of
    /// the expected shape.
    pub fn parse(source_name: &str, body: &str) -> Result<Self, SheetError> {
        serde_json::from_str(body).map_err(|e| SheetError::malformed(source_name, e.to_string()))
    }

    /// Consumes the document and returns its rows.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::InvalidType` when `:type` is not `sheet`.
    pub fn into_rows(self) -> Result<Vec<SheetEntry>, SheetError> {
        match self.kind.as_deref() {
            Some(SHEET_TYPE) => Ok(self.data),
            Some(other) => Err(SheetError::invalid_type(other)),
            None => Err(SheetError::invalid_type("undefined")),
        }
    }

    /// Total rows: the API's `total` when present, else the number of rows.
    #[must_use]
    pub fn total_rows(&self) -> u64 {
        self.total.unwrap_or(self.data.len() as u64)
    }
}
