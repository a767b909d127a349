use super::blocks::{BlockKind, carousel_blocks};
use super::fragments::{FragmentLink, fragment_links, page_template};
use super::media::{MediaScope, image_assets, video_assets};
use super::rows::sheet_links;

/// Everything the crawler reads from one fetched page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSummary {
    /// `<meta name="template">` content.
    pub template: Option<String>,
    /// Fragment links under `main .fragment`, in document order.
    pub fragments: Vec<FragmentLink>,
    /// Sheet links of `.recognitions` rows, as root-relative paths.
    pub sheet_links: Vec<String>,
    /// Media paths anywhere in the page.
    pub images: Vec<String>,
    /// Video asset names anywhere in the page.
    pub videos: Vec<String>,
    /// Media paths inside dashboards carousels.
    pub dashboard_images: Vec<String>,
    /// Video asset names inside dashboards carousels.
    pub dashboard_videos: Vec<String>,
    /// Carousel block kinds present, in document order.
    pub blocks: Vec<BlockKind>,
}

impl PageSummary {
    /// Reads a page's template, links, media and carousel blocks.
    #[must_use]
    pub fn extract(markup: &str) -> Self {
        Self {
            template: page_template(markup),
            fragments: fragment_links(markup),
            sheet_links: sheet_links(markup),
            images: image_assets(markup, MediaScope::Document),
            videos: video_assets(markup, MediaScope::Document),
            dashboard_images: image_assets(markup, MediaScope::DashboardsCarousel),
            dashboard_videos: video_assets(markup, MediaScope::DashboardsCarousel),
            blocks: carousel_blocks(markup)
                .into_iter()
                .map(|block| block.kind)
                .collect(),
        }
    }

    /// Returns true when the page carries a block of `kind`.
    #[must_use]
    pub fn has_block(&self, kind: BlockKind) -> bool {
        self.blocks.contains(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_summary() {
        let markup = r#"<html><head><meta name="template" content="recognitions"></head><body><main>
          <div class="carousel recognitions">
            <div>
              <div><picture><img src="./media_bg.png?w=1"></picture></div>
              <div><a href="/content/org-x/recognitions.json">x</a></div>
            </div>
          </div>
          <div class="fragment"><a href="/content/frag">f</a></div>
        </main></body></html>"#;
        let summary = PageSummary::extract(markup);
        assert_eq!(summary.template.as_deref(), Some("recognitions"));
        assert_eq!(summary.sheet_links, vec!["/content/org-x/recognitions.json"]);
        assert_eq!(summary.fragments.len(), 1);
        assert_eq!(summary.images, vec!["/media_bg.png"]);
        assert!(summary.dashboard_images.is_empty());
        assert!(summary.has_block(BlockKind::Recognitions));
        assert!(!summary.has_block(BlockKind::Dashboards));
    }
}
