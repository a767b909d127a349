//! Image and video asset discovery.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};
use tracing::{debug, warn};
use url::Url;

use super::selectors::{DASHBOARDS_CAROUSEL, DIV, IMG, SOURCE};
use crate::asset::{MEDIA_MARKER, extract_media_from_path};

/// Label that marks a text cell as carrying a video URL.
const VIDEO_LABEL: &str = "Video:";

#[allow(clippy::expect_used)]
static VIDEO_URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https?://[^\s'"]+"#).expect("video URL regex is valid") // Static pattern, safe to panic
});

/// Part of the document media is collected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaScope {
    /// The whole document.
    Document,
    /// Only inside `div.carousel.dashboards` blocks.
    DashboardsCarousel,
}

/// Collects `/media_` image paths from `img[src]` and `source[srcset]`.
///
/// Results are de-duplicated in first-seen order (all `img` first, then
/// all `source` elements).
#[must_use]
pub fn image_assets(markup: &str, scope: MediaScope) -> Vec<String> {
    let document = Html::parse_document(markup);
    let roots = scope_roots(&document, scope);

    let mut seen = HashSet::new();
    let mut assets = Vec::new();
    let mut push = |raw: &str| {
        if raw.contains(MEDIA_MARKER) {
            let media = extract_media_from_path(raw);
            if seen.insert(media.clone()) {
                debug!(media = %media, "Extracted image URL");
                assets.push(media);
            }
        }
    };

    for root in &roots {
        for img in root.select(&IMG) {
            push(img.value().attr("src").unwrap_or_default());
        }
    }
    for root in &roots {
        for source in root.select(&SOURCE) {
            push(source.value().attr("srcset").unwrap_or_default());
        }
    }
    assets
}

/// Collects video asset names (last path segment, with leading `/`) from
/// `Video:` labelled text.
///
/// Only the innermost `div` carrying the label is read, so a wrapper div
/// never attributes a sibling's URL to the label.
#[must_use]
pub fn video_assets(markup: &str, scope: MediaScope) -> Vec<String> {
    let document = Html::parse_document(markup);
    let roots = scope_roots(&document, scope);

    let mut seen = HashSet::new();
    let mut assets = Vec::new();
    for root in &roots {
        for cell in root.select(&DIV).filter(|div| is_innermost_video_cell(*div)) {
            let text = cell.text().collect::<String>();
            let Some(url) = first_video_url(&text) else {
                debug!("No video URL found.");
                continue;
            };
            match video_asset_name(&url) {
                Some(name) => {
                    if seen.insert(name.clone()) {
                        debug!(url = %url, "Extracted video URL");
                        assets.push(name);
                    }
                }
                None => warn!(url = %url, "Error extracting video URL"),
            }
        }
    }
    assets
}

/// Returns the first `http(s)` URL in `text`, minus one trailing `.,;:`.
#[must_use]
pub fn first_video_url(text: &str) -> Option<String> {
    let found = VIDEO_URL_PATTERN.find(text)?.as_str();
    let trimmed = found
        .strip_suffix(['.', ',', ';', ':'])
        .unwrap_or(found);
    Some(trimmed.to_string())
}

/// Returns `/<last path segment>` of a video URL.
///
/// ```
/// use recognitions_core::markup::video_asset_name;
///
/// assert_eq!(
///     video_asset_name("https://cdn.example.com/v/town-hall.mp4").as_deref(),
///     Some("/town-hall.mp4")
/// );
/// ```
#[must_use]
pub fn video_asset_name(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let path = parsed.path();
    let index = path.rfind('/')?;
    Some(path[index..].to_string())
}

fn scope_roots(document: &Html, scope: MediaScope) -> Vec<ElementRef<'_>> {
    match scope {
        MediaScope::Document => vec![document.root_element()],
        MediaScope::DashboardsCarousel => {
            let roots: Vec<_> = document.select(&DASHBOARDS_CAROUSEL).collect();
            if roots.is_empty() {
                debug!("No dashboards carousel found for media extraction");
            }
            roots
        }
    }
}

fn is_innermost_video_cell(div: ElementRef<'_>) -> bool {
    div.text().any(|chunk| chunk.contains(VIDEO_LABEL))
        && !div
            .select(&DIV)
            .any(|inner| inner.text().any(|chunk| chunk.contains(VIDEO_LABEL)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DASHBOARD: &str = r#"<html><body><main>
      <div class="hero"><img src="./media_outside.png?w=1"></div>
      <div class="carousel dashboards">
        <div>
          <div><picture>
            <source srcset="./media_one.png?width=2000&format=webply">
            <img src="./media_one.png?width=750#x">
          </picture></div>
        </div>
        <div>
          <div>Video: https://cdn.example.com/videos/town-hall.mp4.</div>
        </div>
        <div>
          <div><p>Video: <a href="https://cdn.example.com/v/intro.mp4">https://cdn.example.com/v/intro.mp4</a></p></div>
        </div>
        <div><div><img src="/icons/logo.svg"></div></div>
      </div>
    </main></body></html>"#;

    #[test]
    fn test_image_assets_scoped_to_dashboards() {
        assert_eq!(
            image_assets(DASHBOARD, MediaScope::DashboardsCarousel),
            vec!["/media_one.png"]
        );
    }

    #[test]
    fn test_image_assets_whole_document() {
        assert_eq!(
            image_assets(DASHBOARD, MediaScope::Document),
            vec!["/media_outside.png", "/media_one.png"]
        );
    }

    #[test]
    fn test_video_assets_use_last_segment_and_strip_punctuation() {
        assert_eq!(
            video_assets(DASHBOARD, MediaScope::DashboardsCarousel),
            vec!["/town-hall.mp4", "/intro.mp4"]
        );
    }

    #[test]
    fn test_video_assets_absent_scope_is_empty() {
        assert!(video_assets("<main><div>Video: https://x.y/z.mp4</div></main>", MediaScope::DashboardsCarousel).is_empty());
        assert_eq!(
            video_assets("<main><div>Video: https://x.y/z.mp4</div></main>", MediaScope::Document),
            vec!["/z.mp4"]
        );
    }

    #[test]
    fn test_first_video_url_strips_single_trailing_mark() {
        assert_eq!(
            first_video_url("see https://a.b/c.mp4;").as_deref(),
            Some("https://a.b/c.mp4")
        );
        assert_eq!(first_video_url("no link"), None);
    }
}
