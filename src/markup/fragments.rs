//! Fragment links and page template metadata.

use scraper::Html;
use tracing::debug;
use url::Url;

use super::selectors::{FRAGMENT_LINKS, TEMPLATE_META};

/// A fragment reference found under `main .fragment`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentLink {
    /// The href exactly as written in the markup.
    pub href: String,
    /// Root-relative path the fragment is crawled and stored under.
    pub path: String,
}

impl FragmentLink {
    /// Returns true when the markup href differs from the crawl path.
    #[must_use]
    pub fn is_rewritten(&self) -> bool {
        self.href != self.path
    }
}

/// Reduces a link to a root-relative path.
///
/// Absolute `http(s)` URLs keep only their path; relative links gain a
/// leading `/`. Surrounding whitespace is dropped.
///
/// ```
/// use recognitions_core::markup::normalize_link;
///
/// assert_eq!(normalize_link("https://host/content/frag?x=1"), "/content/frag");
/// assert_eq!(normalize_link("content/frag"), "/content/frag");
/// ```
#[must_use]
pub fn normalize_link(href: &str) -> String {
    let href = href.trim();
    if href.is_empty() {
        return String::new();
    }
    if (href.starts_with("http://") || href.starts_with("https://"))
        && let Ok(url) = Url::parse(href)
    {
        debug!(from = href, to = url.path(), "Normalized absolute URL");
        return url.path().to_string();
    }
    if href.starts_with('/') {
        href.to_string()
    } else {
        format!("/{href}")
    }
}

/// Returns the fragment links of a page in document order.
#[must_use]
pub fn fragment_links(markup: &str) -> Vec<FragmentLink> {
    let document = Html::parse_document(markup);
    document
        .select(&FRAGMENT_LINKS)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter_map(|href| {
            let path = normalize_link(href);
            (!path.is_empty()).then(|| FragmentLink {
                href: href.to_string(),
                path,
            })
        })
        .collect()
}

/// Returns the `<meta name="template">` content, if present and non-blank.
#[must_use]
pub fn page_template(markup: &str) -> Option<String> {
    let document = Html::parse_document(markup);
    document
        .select(&TEMPLATE_META)
        .filter_map(|meta| meta.value().attr("content"))
        .map(str::trim)
        .find(|content| !content.is_empty())
        .map(str::to_string)
}

/// Rewrites `href` attribute values in raw markup.
///
/// Used to store snapshots whose fragment links point at the same
/// root-relative paths the crawler stored the fragments under.
#[must_use]
pub fn rewrite_links(markup: &str, links: &[FragmentLink]) -> String {
    let mut rewritten = markup.to_string();
    for link in links.iter().filter(|link| link.is_rewritten()) {
        for quote in ['"', '\''] {
            let from = format!("href={quote}{}{quote}", link.href);
            let to = format!("href={quote}{}{quote}", link.path);
            rewritten = rewritten.replace(&from, &to);
        }
    }
    rewritten
}
