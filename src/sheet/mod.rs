//! Sheet JSON documents published by the CMS.
//!
//! A sheet is `{ ":type": "sheet", "data": [ { column: value, ... } ] }`.
//! Any other `:type` is a hard failure for that sheet. Column access goes
//! through [`SheetEntry`], which treats empty cells as absent.

mod document;
mod error;

pub use document::{SheetDocument, SheetEntry, columns};
pub use error::SheetError;
