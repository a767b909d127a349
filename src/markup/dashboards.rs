//! Dashboards block rows as slide media.

use scraper::{ElementRef, Html};
use tracing::{debug, warn};
use url::Url;

use super::error::MarkupError;
use super::media::first_video_url;
use super::rows::collapse_whitespace;
use super::selectors::{ANCHOR, DASHBOARDS_ROWS, IFRAME, IMG};
use crate::asset::validate_date_format;

/// What a dashboard slide displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlideMedia {
    /// An image, by its `src` as written in the markup.
    Image(String),
    /// A video URL taken from `Video:` labelled text.
    Video(String),
    /// A page embedded through an iframe.
    Iframe(Url),
}

impl SlideMedia {
    /// Returns true for iframe media.
    #[must_use]
    pub fn is_iframe(&self) -> bool {
        matches!(self, Self::Iframe(_))
    }
}

/// One row of a `.dashboards` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSlide {
    /// The slide's media.
    pub media: SlideMedia,
    /// Raw `D/M/YYYY` start date, if the row has one.
    pub start_date: Option<String>,
    /// Raw `D/M/YYYY` end date, if the row has one.
    pub end_date: Option<String>,
}

/// Reads every `.dashboards > div` row.
///
/// A row's direct child `div`s are the media cell, then the optional start
/// and end date cells. The media cell is read as a video when it carries a
/// `Video:` label, as an image when it holds an `img`, and as an embedded
/// page when it holds an iframe or a link. Rows with none of these, or with
/// a date cell that is not `D/M/YYYY`, are logged and skipped.
#[must_use]
pub fn dashboard_slides(markup: &str, base: &Url) -> Vec<DashboardSlide> {
    let document = Html::parse_document(markup);
    let mut slides = Vec::new();
    for (index, row) in document.select(&DASHBOARDS_ROWS).enumerate() {
        match read_slide(index, row, base) {
            Ok(slide) => {
                debug!(row = index, media = ?slide.media, "dashboard slide");
                slides.push(slide);
            }
            Err(error) => warn!(error = %error, "Skipping dashboard row"),
        }
    }
    if slides.is_empty() {
        warn!("No dashboard slides found.");
    }
    slides
}

fn read_slide(index: usize, row: ElementRef<'_>, base: &Url) -> Result<DashboardSlide, MarkupError> {
    let cells: Vec<ElementRef<'_>> = row
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "div")
        .collect();
    let media_cell = cells
        .first()
        .ok_or_else(|| MarkupError::missing(index, "media cell"))?;

    let date_cell = |position: usize| -> Result<Option<String>, MarkupError> {
        let text = cells
            .get(position)
            .map(|cell| collapse_whitespace(&cell.text().collect::<String>()))
            .filter(|text| !text.is_empty());
        if let Some(text) = &text {
            validate_date_format(text).map_err(|e| MarkupError::invalid_date(index, e))?;
        }
        Ok(text)
    };

    Ok(DashboardSlide {
        media: read_media(index, *media_cell, base)?,
        start_date: date_cell(1)?,
        end_date: date_cell(2)?,
    })
}

fn read_media(index: usize, cell: ElementRef<'_>, base: &Url) -> Result<SlideMedia, MarkupError> {
    let text = cell.text().collect::<String>();
    if text.contains("Video:")
        && let Some(url) = first_video_url(&text)
    {
        return Ok(SlideMedia::Video(url));
    }

    if let Some(src) = cell.select(&IMG).find_map(|img| img.value().attr("src")) {
        return Ok(SlideMedia::Image(src.to_string()));
    }

    let embedded = cell
        .select(&IFRAME)
        .find_map(|iframe| iframe.value().attr("src"))
        .or_else(|| cell.select(&ANCHOR).find_map(|anchor| anchor.value().attr("href")));
    match embedded {
        Some(href) => base
            .join(href.trim())
            .map(SlideMedia::Iframe)
            .map_err(|_| MarkupError::InvalidLink {
                row: index,
                href: href.to_string(),
            }),
        None => Err(MarkupError::missing(index, "slide media")),
    }
}
