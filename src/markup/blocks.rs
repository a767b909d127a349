//! Carousel block kinds and block discovery.

use std::fmt;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::selectors::{CAROUSEL_BLOCKS, DASHBOARDS_ROWS, RECOGNITIONS_ROWS};

/// The kinds of carousel block a page can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Rows link to recognitions sheets.
    Recognitions,
    /// Rows carry dashboard media (image, video or embedded page).
    Dashboards,
}

impl BlockKind {
    /// The block's CSS class, also used as the provenance class of its items.
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Recognitions => "recognitions",
            Self::Dashboards => "dashboards",
        }
    }

    pub(super) fn row_selector(self) -> &'static Selector {
        match self {
            Self::Recognitions => &RECOGNITIONS_ROWS,
            Self::Dashboards => &DASHBOARDS_ROWS,
        }
    }

    fn from_element(element: ElementRef<'_>) -> Option<Self> {
        let has_class = |name: &str| element.value().classes().any(|class| class == name);
        if has_class("recognitions") {
            Some(Self::Recognitions)
        } else if has_class("dashboards") {
            Some(Self::Dashboards)
        } else {
            None
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// One carousel block found on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselBlock {
    /// Which rows the block carries.
    pub kind: BlockKind,
    /// Outer HTML of the block, re-parsed by the row readers.
    pub html: String,
}

/// Returns every `.carousel.recognitions` / `.carousel.dashboards` block in
/// document order.
#[must_use]
pub fn carousel_blocks(markup: &str) -> Vec<CarouselBlock> {
    let document = Html::parse_document(markup);
    let blocks: Vec<CarouselBlock> = document
        .select(&CAROUSEL_BLOCKS)
        .filter_map(|element| {
            BlockKind::from_element(element).map(|kind| CarouselBlock {
                kind,
                html: element.html(),
            })
        })
        .collect();
    debug!(count = blocks.len(), "carousel blocks found");
    blocks
}
