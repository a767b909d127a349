//! Carousel row extraction (`.recognitions > div`).

use scraper::{ElementRef, Html};
use tracing::{debug, warn};
use url::Url;

use super::blocks::BlockKind;
use super::error::MarkupError;
use super::fragments::normalize_link;
use super::selectors::{ANCHOR, DIV, DIV_ANCHOR, PICTURE, RECOGNITIONS_ROWS};

/// One configured content row of a carousel block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRowDescriptor {
    /// Absolute URL of the row's sheet.
    pub link: Url,
    /// Outer HTML of the row's background `<picture>`.
    pub background: String,
    /// Optional team name shown when a sheet entry has no title.
    pub team_name: Option<String>,
}

/// Extracts the configured rows of every `kind` block in `markup`.
///
/// Each row's nested `div`s are, in order, the background picture, the
/// sheet link and an optional team name. Rows without a link anchor or a
/// picture are logged and skipped. Relative links resolve against `base`.
/// Row order is document order.
#[must_use]
#[tracing::instrument(skip(markup), fields(markup_len = markup.len()))]
pub fn extract_sheet_rows(markup: &str, kind: BlockKind, base: &Url) -> Vec<SheetRowDescriptor> {
    let document = Html::parse_document(markup);
    let rows: Vec<ElementRef<'_>> = document.select(kind.row_selector()).collect();
    if rows.is_empty() {
        warn!(block = kind.class_name(), "No carousel data found while extracting sheet data.");
        return Vec::new();
    }

    let mut descriptors = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        match read_row(index, row, base) {
            Ok(descriptor) => {
                debug!(row = index, link = %descriptor.link, "extracted sheet row");
                descriptors.push(descriptor);
            }
            Err(error) => warn!(error = %error, "Exception while processing row"),
        }
    }
    descriptors
}

fn read_row(
    index: usize,
    row: ElementRef<'_>,
    base: &Url,
) -> Result<SheetRowDescriptor, MarkupError> {
    let cells: Vec<ElementRef<'_>> = row.select(&DIV).collect();

    let anchor = cells
        .get(1)
        .and_then(|cell| cell.select(&ANCHOR).next())
        .ok_or_else(|| MarkupError::missing(index, "link anchor"))?;
    let href = anchor.value().attr("href").unwrap_or_default();
    let link = base.join(href).map_err(|_| MarkupError::InvalidLink {
        row: index,
        href: href.to_string(),
    })?;

    let background = cells
        .first()
        .and_then(|cell| cell.select(&PICTURE).next())
        .ok_or_else(|| MarkupError::missing(index, "background picture"))?
        .html();

    let team_name = cells
        .get(2)
        .map(|cell| collapse_whitespace(&cell.text().collect::<String>()))
        .filter(|name| !name.is_empty());

    Ok(SheetRowDescriptor {
        link,
        background,
        team_name,
    })
}

/// Returns the sheet link of every `.recognitions > div` row, as root-relative paths.
///
/// Absolute links are reduced to their path. Rows without a link are skipped.
#[must_use]
pub fn sheet_links(markup: &str) -> Vec<String> {
    let document = Html::parse_document(markup);
    let links: Vec<String> = document
        .select(&RECOGNITIONS_ROWS)
        .filter_map(|row| row.select(&DIV_ANCHOR).next())
        .filter_map(|anchor| anchor.value().attr("href"))
        .map(normalize_link)
        .filter(|link| !link.is_empty())
        .collect();
    if links.is_empty() {
        warn!("No recognition carousel data found while extracting sheet data.");
    }
    links
}

pub(super) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
