//! Error types for carousel item building.

use thiserror::Error;

use crate::asset::DateError;
use crate::sheet::SheetError;

/// Why a single sheet row could not become a carousel item.
///
/// Always caught at the row: the row is logged and skipped, its siblings
/// are still built.
#[derive(Debug, Error)]
pub enum ItemError {
    /// Neither an explicit image nor an LDAP id to derive one from.
    #[error("row has neither 'Image URL' nor 'LDAP'")]
    MissingImage,

    /// A required column is absent.
    #[error(transparent)]
    Field(#[from] SheetError),

    /// A date cell is not `D/M/YYYY`.
    #[error(transparent)]
    Date(#[from] DateError),
}
