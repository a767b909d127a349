//! Building one track from every carousel block on a page.

use std::time::Duration;

use futures_util::future::join_all;
use tracing::{info, instrument, warn};
use url::Url;

use super::builder::{BuildOptions, BuildOutcome, CarouselBuilder, SheetSource};
use super::render::{CarouselItemElement, CarouselTrack, TrackUpdate};
use crate::markup::{BlockKind, CarouselBlock, carousel_blocks, dashboard_slides, extract_sheet_rows};

/// Item duration of a recognitions-only carousel.
pub const RECOGNITIONS_ITEM_DURATION: Duration = Duration::from_secs(10);

/// Item duration of a dashboards-only carousel.
pub const DASHBOARDS_ITEM_DURATION: Duration = Duration::from_secs(30);

/// Shared item duration when several blocks are merged into one track.
pub const UNIFIED_ITEM_DURATION: Duration = Duration::from_secs(15);

/// Item durations per carousel flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Durations {
    /// Recognitions-only carousels.
    pub recognitions: Duration,
    /// Dashboards-only carousels.
    pub dashboards: Duration,
    /// Merged carousels, whatever the items' origin.
    pub unified: Duration,
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            recognitions: RECOGNITIONS_ITEM_DURATION,
            dashboards: DASHBOARDS_ITEM_DURATION,
            unified: UNIFIED_ITEM_DURATION,
        }
    }
}

impl Durations {
    /// Duration for a page carrying `blocks`, in document order.
    #[must_use]
    pub fn for_blocks(&self, blocks: &[BlockKind]) -> Duration {
        match blocks {
            [BlockKind::Dashboards] => self.dashboards,
            [] | [BlockKind::Recognitions] => self.recognitions,
            _ => self.unified,
        }
    }
}

/// The merged carousel of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    /// Items of every block, in block order.
    pub items: Vec<CarouselItemElement>,
    /// True when no item was built and at least one block failed to load.
    pub failed: bool,
    /// Duration every item is shown for.
    pub item_duration: Duration,
    /// Set when the only item is the synthesised fallback iframe.
    pub skip_iframe_reload: bool,
    /// Blocks after the first; they render nothing of their own.
    pub skipped_blocks: usize,
}

impl Composition {
    /// Applies the composition to a track. Without items the old ones are kept.
    pub fn apply_to(self, track: &mut CarouselTrack) -> TrackUpdate {
        if !self.items.is_empty() {
            let count = self.items.len();
            track.replace_with(self.items);
            TrackUpdate::Replaced(count)
        } else if self.failed {
            warn!(kept = track.len(), "Skipping carousel update after block failures");
            TrackUpdate::Kept
        } else {
            info!(kept = track.len(), "Composition has no items; keeping track");
            TrackUpdate::Kept
        }
    }
}

/// Composes a page's carousel blocks into a single track.
pub struct CarouselComposer<'a> {
    source: &'a dyn SheetSource,
    options: BuildOptions,
    durations: Durations,
    fallback_url: Option<Url>,
}

impl<'a> CarouselComposer<'a> {
    /// Creates a composer reading sheets from `source`.
    #[must_use]
    pub fn new(source: &'a dyn SheetSource, options: BuildOptions, durations: Durations) -> Self {
        Self {
            source,
            options,
            durations,
            fallback_url: None,
        }
    }

    /// Page embedded as a single slide when no block yields any item.
    #[must_use]
    pub fn with_fallback_url(mut self, url: Option<Url>) -> Self {
        self.fallback_url = url;
        self
    }

    /// Builds the carousel of a page.
    ///
    /// All blocks load concurrently. With more than one block the items are
    /// tagged with their block's class and share the unified duration.
    #[instrument(skip(self, markup), fields(base = %base))]
    pub async fn compose(&self, markup: &str, base: &Url) -> Composition {
        let blocks = carousel_blocks(markup);
        let kinds: Vec<BlockKind> = blocks.iter().map(|block| block.kind).collect();
        let merged = blocks.len() > 1;

        let loaded = join_all(blocks.iter().map(|block| self.load_block(block, base))).await;

        let mut items = Vec::new();
        let mut failed = false;
        for (block, (block_items, block_failed)) in blocks.iter().zip(loaded) {
            failed |= block_failed;
            if merged {
                items.extend(
                    block_items
                        .into_iter()
                        .map(|item| item.with_provenance(block.kind)),
                );
            } else {
                items.extend(block_items);
            }
        }

        let mut item_duration = self.durations.for_blocks(&kinds);
        let mut skip_iframe_reload = false;
        if items.is_empty()
            && let Some(url) = &self.fallback_url
        {
            info!(url = %url, "No carousel items found; showing fallback dashboard");
            items.push(CarouselItemElement::fallback_iframe(url));
            item_duration = self.durations.dashboards;
            skip_iframe_reload = true;
        }

        let skipped_blocks = blocks.len().saturating_sub(1);
        if skipped_blocks > 0 {
            info!(skipped_blocks, "merged carousel blocks into the first block's track");
        }
        Composition {
            failed: failed && items.is_empty(),
            items,
            item_duration,
            skip_iframe_reload,
            skipped_blocks,
        }
    }

    async fn load_block(&self, block: &CarouselBlock, base: &Url) -> (Vec<CarouselItemElement>, bool) {
        match block.kind {
            BlockKind::Recognitions => {
                let rows = extract_sheet_rows(&block.html, block.kind, base);
                let outcome = CarouselBuilder::new(self.source, self.options.clone())
                    .build(&rows)
                    .await;
                let failed = matches!(outcome, BuildOutcome::Failed { .. });
                let items = outcome
                    .into_items()
                    .iter()
                    .map(CarouselItemElement::from_asset)
                    .collect();
                (items, failed)
            }
            BlockKind::Dashboards => {
                let items = dashboard_slides(&block.html, base)
                    .iter()
                    .map(CarouselItemElement::from_dashboard_slide)
                    .collect();
                (items, false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_policy() {
        let durations = Durations::default();
        assert_eq!(durations.for_blocks(&[BlockKind::Recognitions]), Duration::from_secs(10));
        assert_eq!(durations.for_blocks(&[BlockKind::Dashboards]), Duration::from_secs(30));
        assert_eq!(
            durations.for_blocks(&[BlockKind::Recognitions, BlockKind::Dashboards]),
            Duration::from_secs(15)
        );
        assert_eq!(
            durations.for_blocks(&[BlockKind::Recognitions, BlockKind::Recognitions]),
            Duration::from_secs(15)
        );
    }
}
