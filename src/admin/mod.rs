//! CMS admin API: preview, publish and cache purge.
//!
//! [`AdminClient`] wraps the individual endpoints; the workflow functions
//! ([`preview_sheet`], [`publish_sheet`], [`publish_channel`]) chain them
//! the way editors use them from the sidekick and return the page to open
//! afterwards.

mod client;
mod error;
mod workflow;

pub use client::{
    AdminAction, AdminClient, AdminTarget, DEFAULT_ADMIN_BASE, DocumentStatus, SidekickConfig,
    StatusEntry,
};
pub use error::AdminError;
pub use workflow::{
    WorkflowReport, is_dashboard_document, page_path_for_sheet, preview_sheet, publish_channel,
    publish_sheet, sheet_path_for_page,
};
