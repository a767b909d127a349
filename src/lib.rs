//! Recognitions Core Library
//!
//! Runtime core of the recognitions screens carousel and the offline
//! bundle generator for a Franklin content site.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`fetch`] - HTTP client for markup, sheets and image probes
//! - [`markup`] - block, fragment and media extraction from delivered HTML
//! - [`asset`] - media path normalization, profile paths, date windows
//! - [`sheet`] - sheet JSON documents and typed column access
//! - [`carousel`] - item building, track rendering, playback engine
//! - [`crawler`] - offline page and fragment crawler with asset manifest
//! - [`admin`] - admin API preview, publish and cache purge workflows
//! - [`stats`] - per-sheet recognitions statistics

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod admin;
pub mod asset;
pub mod carousel;
pub mod crawler;
pub mod fetch;
pub mod markup;
pub mod sheet;
pub mod stats;
mod user_agent;

// Re-export commonly used types
pub use asset::{DateWindow, extract_media_from_path};
pub use carousel::{
    AssetDescriptor, BuildOutcome, CarouselBuilder, CarouselComposer, CarouselTrack,
    PlaybackEngine, SheetSource,
};
pub use crawler::{AssetManifest, Generator, TemplateKind};
pub use fetch::{FetchError, HttpClient};
pub use markup::{SheetRowDescriptor, extract_sheet_rows};
