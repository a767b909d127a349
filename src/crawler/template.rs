//! Page templates and what each one contributes to the manifest.

use std::fmt;

/// The page templates the generator knows how to crawl.
///
/// Parsed from `<meta name="template">`. Unknown or missing templates map
/// to [`TemplateKind::Default`], so every page has a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// Recognitions carousel backed by sheets.
    Recognitions,
    /// Dashboards carousel (images, videos, embedded pages).
    Dashboards,
    /// A page made of fragments of other templates.
    Embedded,
    /// Recognitions and dashboards content on one page.
    AccoladesAndPosters,
    /// Several carousel fragments merged into one track.
    UnifiedContent,
    /// Anything else: page-local media only.
    Default,
}

impl TemplateKind {
    /// Every kind, in registry order.
    pub const ALL: [Self; 6] = [
        Self::Recognitions,
        Self::Dashboards,
        Self::Embedded,
        Self::AccoladesAndPosters,
        Self::UnifiedContent,
        Self::Default,
    ];

    /// Maps a template meta value to its kind. Never fails.
    ///
    /// ```
    /// use recognitions_core::crawler::TemplateKind;
    ///
    /// assert_eq!(TemplateKind::parse(Some(" Recognitions ")), TemplateKind::Recognitions);
    /// assert_eq!(TemplateKind::parse(Some("poster-wall")), TemplateKind::Default);
    /// assert_eq!(TemplateKind::parse(None), TemplateKind::Default);
    /// ```
    #[must_use]
    pub fn parse(template: Option<&str>) -> Self {
        let Some(template) = template else {
            return Self::Default;
        };
        let template = template.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == template)
            .unwrap_or(Self::Default)
    }

    /// The template meta value of this kind.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Recognitions => "recognitions",
            Self::Dashboards => "dashboards",
            Self::Embedded => "embedded",
            Self::AccoladesAndPosters => "accoladesandposters",
            Self::UnifiedContent => "unifiedcontent",
            Self::Default => "default",
        }
    }

    /// Whether the handler reads recognitions sheets.
    #[must_use]
    pub fn collects_sheets(self) -> bool {
        matches!(self, Self::Recognitions | Self::AccoladesAndPosters)
    }

    /// Whether the handler collects dashboards carousel media.
    #[must_use]
    pub fn collects_dashboard_media(self) -> bool {
        matches!(self, Self::Dashboards | Self::AccoladesAndPosters)
    }

    /// Whether the handler collects media from anywhere in the page.
    ///
    /// Recognitions rows carry their background pictures in the page itself.
    #[must_use]
    pub fn collects_page_media(self) -> bool {
        matches!(
            self,
            Self::Recognitions | Self::AccoladesAndPosters | Self::Default
        )
    }

    /// Whether the page renders a carousel (block scripts are needed).
    #[must_use]
    pub fn uses_carousel(self) -> bool {
        matches!(
            self,
            Self::Recognitions | Self::Dashboards | Self::AccoladesAndPosters
        )
    }

    /// Whether recognitions fonts and the not-found icon are needed.
    #[must_use]
    pub fn uses_recognitions_styles(self) -> bool {
        self.collects_sheets()
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_round_trips() {
        for kind in TemplateKind::ALL {
            assert_eq!(TemplateKind::parse(Some(kind.name())), kind);
        }
    }

    #[test]
    fn test_unknown_and_blank_fall_back_to_default() {
        assert_eq!(TemplateKind::parse(Some("")), TemplateKind::Default);
        assert_eq!(TemplateKind::parse(Some("slideshow")), TemplateKind::Default);
    }

    #[test]
    fn test_handler_capabilities() {
        assert!(TemplateKind::AccoladesAndPosters.collects_sheets());
        assert!(TemplateKind::AccoladesAndPosters.collects_dashboard_media());
        assert!(!TemplateKind::Embedded.uses_carousel());
        assert!(!TemplateKind::UnifiedContent.collects_page_media());
        assert!(TemplateKind::Default.collects_page_media());
        assert!(TemplateKind::Recognitions.collects_page_media());
        assert!(!TemplateKind::Dashboards.collects_page_media());
    }
}
