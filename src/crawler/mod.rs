//! Offline bundle generator.
//!
//! Walks published pages and their fragments, dispatching each page on its
//! `<meta name="template">` to a fixed handler, and produces:
//!
//! - an [`AssetManifest`] of root-relative paths to cache (sheets, media,
//!   profile photos, fragment snapshots, block scripts, fonts, icons)
//! - `<path>.html` and `<path>.plain.html` snapshots under the output directory
//!
//! Fragment crawling keeps a visited set per top-level page and stops at a
//! depth limit, so self-referencing fragments terminate.
//!
//! # Example
//!
//! ```no_run
//! use recognitions_core::crawler::Generator;
//! use recognitions_core::fetch::HttpClient;
//! use url::Url;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let host = Url::parse("https://main--screens--org.hlx.live")?;
//! let generator = Generator::new(HttpClient::new(), host, "offline");
//! let manifest = generator.generate("/content/screens/org/main").await;
//! for asset in &manifest {
//!     println!("{asset}");
//! }
//! # Ok(())
//! # }
//! ```

mod constants;
mod error;
mod generator;
mod manifest;
mod snapshot;
mod template;

pub use constants::{
    CAROUSEL_ASSETS, DEFAULT_IMAGE_HOST, DEFAULT_MAX_DEPTH, FONT_ASSETS, FRAGMENT_ASSETS,
    NOT_FOUND_ICON, PROFILE_IMAGE_REFERER,
};
pub use error::CrawlError;
pub use generator::Generator;
pub use manifest::AssetManifest;
pub use template::TemplateKind;
