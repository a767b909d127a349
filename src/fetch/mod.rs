//! HTTP access to the delivery host, the sheet API and the image host.
//!
//! Everything in this crate that talks to the network goes through
//! [`HttpClient`]. There is no retry layer: a failed request is
//! reported once as a [`FetchError`] and the caller decides whether to drop
//! the item or abort the page.
//!
//! # Example
//!
//! ```no_run
//! use recognitions_core::fetch::HttpClient;
//! use url::Url;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new();
//! let host = Url::parse("https://main--screens--org.hlx.live")?;
//! let markup = client.get_text(&client.resolve(&host, "/content/screens/org/main")?).await?;
//! println!("{} bytes of markup", markup.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod constants;
mod error;

pub use client::HttpClient;
pub use constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
pub use error::FetchError;
