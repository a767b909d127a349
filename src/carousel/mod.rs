//! The runtime carousel: items from sheets, rendering, and playback.
//!
//! # Architecture
//!
//! - [`CarouselBuilder`] - loads each row's sheet through a [`SheetSource`]
//!   and derives [`AssetDescriptor`] records
//! - [`CarouselTrack`] / [`CarouselItemElement`] - the `.carousel-track`
//!   markup contract; a rebuild replaces the whole track
//! - [`PlaybackEngine`] - the `Idle / Advancing / Showing` state machine
//! - [`Scheduler`] - owner of the engine's cancellable timers
//! - [`CarouselComposer`] - merges every carousel block of a page
//!
//! # Example
//!
//! ```no_run
//! use recognitions_core::carousel::{BuildOptions, CarouselBuilder, CarouselTrack};
//! use recognitions_core::fetch::HttpClient;
//! use recognitions_core::markup::{BlockKind, extract_sheet_rows};
//! use url::Url;
//!
//! # async fn example(markup: &str) -> Result<(), Box<dyn std::error::Error>> {
//! let base = Url::parse("https://main--screens--org.hlx.live/content/org/main")?;
//! let rows = extract_sheet_rows(markup, BlockKind::Recognitions, &base);
//!
//! let client = HttpClient::new();
//! let outcome = CarouselBuilder::new(&client, BuildOptions::default())
//!     .build(&rows)
//!     .await;
//!
//! let mut track = CarouselTrack::new();
//! track.apply(outcome);
//! println!("{}", track.to_html());
//! # Ok(())
//! # }
//! ```

mod builder;
mod error;
mod item;
mod playback;
mod render;
mod scheduler;
mod unified;

pub use builder::{
    BuildOptions, BuildOutcome, CarouselBuilder, DEFAULT_HEADING, DEFAULT_PROFILE_IMAGE_HOST,
    NO_HEADING_SENTINEL, SheetSource, build_item, build_items,
};
pub use error::ItemError;
pub use item::AssetDescriptor;
pub use playback::{
    Clock, PlaybackEngine, PlaybackEvent, PlaybackPhase, PlaybackSlide, PlaybackState, Stage,
    SystemClock,
};
pub use render::{CarouselItemElement, CarouselTrack, ItemMedia, TrackUpdate, escape_html};
pub use scheduler::{DEFAULT_TIMER_CAPACITY, Scheduler, TimerToken};
pub use unified::{
    CarouselComposer, Composition, DASHBOARDS_ITEM_DURATION, Durations,
    RECOGNITIONS_ITEM_DURATION, UNIFIED_ITEM_DURATION,
};
