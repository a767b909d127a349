//! Rendering items into the `.carousel-track` markup contract.
//!
//! Every rendered item is a `.carousel-item` carrying `start-date` and
//! `end-date` attributes in `D/M/YYYY` form. The attributes are fixed when
//! the element is built; a changed item means a new element, and a rebuild
//! replaces the whole track.

use tracing::{debug, info, warn};
use url::Url;

use super::builder::BuildOutcome;
use super::item::AssetDescriptor;
use crate::asset::DateWindow;
use crate::markup::{BlockKind, DashboardSlide, SlideMedia};

/// How the playback engine paces an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemMedia {
    /// Shown for the item duration.
    Static,
    /// Shown until the video ends (or fails).
    Video(String),
    /// An embedded page, reloaded ahead of time so it is warm when shown.
    Iframe(Url),
}

/// One rendered carousel item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselItemElement {
    start_date: Option<String>,
    end_date: Option<String>,
    provenance: Option<BlockKind>,
    media: ItemMedia,
    body: String,
}

impl CarouselItemElement {
    /// Renders a recognitions item.
    #[must_use]
    pub fn from_asset(asset: &AssetDescriptor) -> Self {
        let mut body = String::new();
        if let Some(heading) = &asset.heading {
            push_div(&mut body, "carousel-item-heading", &escape_html(heading));
        }
        if let Some(title) = &asset.title {
            push_div(&mut body, "carousel-item-title", &escape_html(title));
        }

        let mut figures = String::new();
        for (image, caption) in asset.figures() {
            figures.push_str(&format!(
                r#"<figure class="carousel-item-figure"><img src="{}" alt="{}">"#,
                escape_html(image),
                escape_html(caption.unwrap_or_default())
            ));
            if let Some(caption) = caption {
                figures.push_str(&format!("<figcaption>{}</figcaption>", escape_html(caption)));
            }
            figures.push_str("</figure>");
        }
        push_div(&mut body, "carousel-item-figures", &figures);
        push_div(
            &mut body,
            "carousel-item-description",
            &escape_html(&asset.description),
        );
        body.push_str(&asset.background);

        Self {
            start_date: asset.start_date.clone(),
            end_date: asset.end_date.clone(),
            provenance: None,
            media: ItemMedia::Static,
            body,
        }
    }

    /// Renders a dashboards slide.
    #[must_use]
    pub fn from_dashboard_slide(slide: &DashboardSlide) -> Self {
        let (media, body) = match &slide.media {
            SlideMedia::Image(src) => (
                ItemMedia::Static,
                format!(r#"<picture><img src="{}" alt=""></picture>"#, escape_html(src)),
            ),
            SlideMedia::Video(src) => (
                ItemMedia::Video(src.clone()),
                format!(
                    r#"<video src="{}" muted playsinline></video>"#,
                    escape_html(src)
                ),
            ),
            SlideMedia::Iframe(url) => (ItemMedia::Iframe(url.clone()), iframe_html(url)),
        };
        Self {
            start_date: slide.start_date.clone(),
            end_date: slide.end_date.clone(),
            provenance: None,
            media,
            body,
        }
    }

    /// A single always-active slide embedding `url`.
    #[must_use]
    pub fn fallback_iframe(url: &Url) -> Self {
        Self {
            start_date: None,
            end_date: None,
            provenance: None,
            media: ItemMedia::Iframe(url.clone()),
            body: iframe_html(url),
        }
    }

    /// Returns the element tagged with the block kind it came from.
    #[must_use]
    pub fn with_provenance(self, kind: BlockKind) -> Self {
        Self {
            provenance: Some(kind),
            ..self
        }
    }

    /// The `start-date` attribute.
    #[must_use]
    pub fn start_date(&self) -> Option<&str> {
        self.start_date.as_deref()
    }

    /// The `end-date` attribute.
    #[must_use]
    pub fn end_date(&self) -> Option<&str> {
        self.end_date.as_deref()
    }

    /// The block kind the item came from, when composed from several blocks.
    #[must_use]
    pub fn provenance(&self) -> Option<BlockKind> {
        self.provenance
    }

    /// How the item is paced.
    #[must_use]
    pub fn media(&self) -> &ItemMedia {
        &self.media
    }

    /// The item's active window, read from its date attributes.
    #[must_use]
    pub fn window(&self) -> DateWindow {
        DateWindow::from_attributes(self.start_date(), self.end_date())
    }

    /// Serialises the element.
    #[must_use]
    pub fn to_html(&self) -> String {
        let class = match self.provenance {
            Some(kind) => format!("carousel-item {}", kind.class_name()),
            None => "carousel-item".to_string(),
        };
        format!(
            r#"<div class="{class}" start-date="{}" end-date="{}">{}</div>"#,
            escape_html(self.start_date().unwrap_or_default()),
            escape_html(self.end_date().unwrap_or_default()),
            self.body
        )
    }
}

/// What [`CarouselTrack::apply`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackUpdate {
    /// The track now holds this many freshly built items.
    Replaced(usize),
    /// Nothing valid was built; the previous items were kept.
    Kept,
}

/// The `.carousel-track` container. Owns its items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarouselTrack {
    items: Vec<CarouselItemElement>,
}

impl CarouselTrack {
    /// Creates an empty track.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every item at once.
    pub fn replace_with(&mut self, items: Vec<CarouselItemElement>) {
        debug!(previous = self.items.len(), next = items.len(), "replacing carousel track");
        self.items = items;
    }

    /// Applies a build result to the track.
    ///
    /// Only a build with items replaces the track; an empty or failed build
    /// keeps whatever was showing.
    pub fn apply(&mut self, outcome: BuildOutcome) -> TrackUpdate {
        match outcome {
            BuildOutcome::Items(assets) => {
                let items: Vec<_> = assets.iter().map(CarouselItemElement::from_asset).collect();
                let count = items.len();
                self.replace_with(items);
                TrackUpdate::Replaced(count)
            }
            BuildOutcome::Empty => {
                info!(kept = self.items.len(), "Carousel build produced no valid items; keeping track");
                TrackUpdate::Kept
            }
            BuildOutcome::Failed { failed_sheets } => {
                warn!(failed_sheets, kept = self.items.len(), "Skipping carousel update after sheet failures");
                TrackUpdate::Kept
            }
        }
    }

    /// The items, in display order.
    #[must_use]
    pub fn items(&self) -> &[CarouselItemElement] {
        &self.items
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true when the track has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Serialises the track and its items.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = String::from(r#"<div class="carousel-track">"#);
        for item in &self.items {
            html.push_str(&item.to_html());
        }
        html.push_str("</div>");
        html
    }
}

/// Escapes text for use in element content and quoted attribute values.
#[must_use]
pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn push_div(html: &mut String, class: &str, inner: &str) {
    html.push_str(&format!(r#"<div class="{class}">{inner}</div>"#));
}

fn iframe_html(url: &Url) -> String {
    format!(
        r#"<iframe src="{}" loading="eager"></iframe>"#,
        escape_html(url.as_str())
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn asset() -> AssetDescriptor {
        AssetDescriptor {
            images: vec!["/is/image/IMGDIR/ab12".to_string(), "/is/image/IMGDIR/cd34".to_string()],
            start_date: Some("1/1/2024".to_string()),
            end_date: None,
            description: "Shipped <fast> & safe".to_string(),
            names: vec!["Jane".to_string()],
            heading: Some("Congratulations".to_string()),
            title: None,
            background: "<picture><img src=\"./media_bg.png\"></picture>".to_string(),
            team_name: None,
        }
    }

    #[test]
    fn test_item_html_contract() {
        let html = CarouselItemElement::from_asset(&asset()).to_html();
        assert!(html.starts_with(r#"<div class="carousel-item" start-date="1/1/2024" end-date="">"#));
        assert!(html.contains(r#"<div class="carousel-item-heading">Congratulations</div>"#));
        assert!(!html.contains("carousel-item-title"));
        assert!(html.contains("Shipped &lt;fast&gt; &amp; safe"));
        assert!(html.contains("<figcaption>Jane</figcaption>"));
        assert_eq!(html.matches("<figcaption>").count(), 1);
        assert_eq!(html.matches("<figure").count(), 2);
        assert!(html.ends_with("</picture></div>"));
    }

    #[test]
    fn test_provenance_class_and_dates_survive_tagging() {
        let element = CarouselItemElement::from_asset(&asset()).with_provenance(BlockKind::Recognitions);
        assert_eq!(element.start_date(), Some("1/1/2024"));
        assert!(element.to_html().starts_with(r#"<div class="carousel-item recognitions""#));
    }

    #[test]
    fn test_dashboard_slide_media() {
        let video = DashboardSlide {
            media: SlideMedia::Video("https://cdn/x.mp4".to_string()),
            start_date: None,
            end_date: Some("1/1/2000".to_string()),
        };
        let element = CarouselItemElement::from_dashboard_slide(&video);
        assert_eq!(element.media(), &ItemMedia::Video("https://cdn/x.mp4".to_string()));
        assert!(element.to_html().contains("<video src=\"https://cdn/x.mp4\""));
        assert_eq!(element.end_date(), Some("1/1/2000"));
    }

    #[test]
    fn test_failed_or_empty_build_keeps_existing_track() {
        let mut track = CarouselTrack::new();
        assert_eq!(track.apply(BuildOutcome::Items(vec![asset()])), TrackUpdate::Replaced(1));
        assert_eq!(track.apply(BuildOutcome::Failed { failed_sheets: 2 }), TrackUpdate::Kept);
        assert_eq!(track.len(), 1);
        assert_eq!(track.apply(BuildOutcome::Empty), TrackUpdate::Kept);
        assert_eq!(track.len(), 1);
    }

    #[test]
    fn test_track_html_wraps_items() {
        let mut track = CarouselTrack::new();
        track.replace_with(vec![CarouselItemElement::fallback_iframe(
            &Url::parse("https://dash.example.com/").unwrap(),
        )]);
        let html = track.to_html();
        assert!(html.starts_with(r#"<div class="carousel-track"><div class="carousel-item""#));
        assert!(html.contains(r#"<iframe src="https://dash.example.com/""#));
    }
}
