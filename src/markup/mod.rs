//! Reading block, fragment and media structure out of delivered markup.
//!
//! Parsed documents (`scraper::Html`) never leave this module: every
//! function takes markup text and returns owned data, so callers can hold
//! the results across `.await` points.
//!
//! - [`extract_sheet_rows`] - carousel rows (background, sheet link, team name)
//! - [`fragment_links`] / [`page_template`] - fragment crawling inputs
//! - [`image_assets`] / [`video_assets`] - media discovered in a page
//! - [`dashboard_slides`] - dashboards block rows as slide media
//! - [`carousel_blocks`] - carousel blocks in document order
//! - [`PageSummary`] - everything the crawler needs from one page

mod blocks;
mod dashboards;
mod error;
mod fragments;
mod media;
mod page;
mod rows;
mod selectors;

pub use blocks::{BlockKind, CarouselBlock, carousel_blocks};
pub use dashboards::{DashboardSlide, SlideMedia, dashboard_slides};
pub use error::MarkupError;
pub use fragments::{FragmentLink, fragment_links, normalize_link, page_template, rewrite_links};
pub use media::{MediaScope, first_video_url, image_assets, video_asset_name, video_assets};
pub use page::PageSummary;
pub use rows::{SheetRowDescriptor, extract_sheet_rows, sheet_links};
