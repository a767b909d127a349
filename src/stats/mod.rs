//! Recognitions sheet statistics.
//!
//! Counts, per sheet, how many entries exist, how many are active today,
//! how many use a custom image, how many have overlong descriptions and how
//! many never expire. "Active" uses the same [`DateWindow`](crate::asset::DateWindow)
//! check as the playback engine.

mod report;

pub use report::{
    LONG_DESCRIPTION_WORDS, SheetStats, StatsReport, collect_stats, org_name,
};
