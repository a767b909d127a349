//! The recursive page and fragment crawler.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use futures_util::future::BoxFuture;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use super::constants::{
    CAROUSEL_ASSETS, DEFAULT_IMAGE_HOST, DEFAULT_MAX_DEPTH, FONT_ASSETS, FRAGMENT_ASSETS,
    HTML_SUFFIX, NOT_FOUND_ICON, PLAIN_HTML_SUFFIX, PROFILE_IMAGE_REFERER,
};
use super::error::CrawlError;
use super::manifest::AssetManifest;
use super::snapshot::write_snapshot;
use super::template::TemplateKind;
use crate::asset::{extract_media_from_path, profile_image_paths};
use crate::carousel::SheetSource;
use crate::fetch::HttpClient;
use crate::markup::{FragmentLink, PageSummary, normalize_link, rewrite_links};
use crate::sheet::columns;

/// Crawls published pages into an offline asset manifest and snapshots.
///
/// Each page is fetched, dispatched on its template, and its fragments are
/// crawled recursively with the same dispatch. Every crawled page is written
/// as `<output>/<path>.html` and `<output>/<path>.plain.html`.
#[derive(Debug, Clone)]
pub struct Generator {
    client: HttpClient,
    host: Url,
    image_host: Url,
    output_dir: PathBuf,
    max_depth: usize,
}

/// Per top-level page crawl state.
struct CrawlState {
    manifest: AssetManifest,
    visited: HashSet<String>,
}

impl CrawlState {
    fn new(root: &str) -> Self {
        Self {
            manifest: AssetManifest::new(),
            visited: HashSet::from([root.to_string()]),
        }
    }
}

impl Generator {
    /// Creates a generator fetching from `host` and writing under `output_dir`.
    #[must_use]
    #[allow(clippy::missing_panics_doc)]
    pub fn new(client: HttpClient, host: Url, output_dir: impl Into<PathBuf>) -> Self {
        #[allow(clippy::expect_used)]
        let image_host = Url::parse(DEFAULT_IMAGE_HOST).expect("default image host is valid"); // Static URL, safe to panic
        Self {
            client,
            host,
            image_host,
            output_dir: output_dir.into(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Host probed for LDAP-derived profile photos.
    #[must_use]
    pub fn with_image_host(mut self, image_host: Url) -> Self {
        self.image_host = image_host;
        self
    }

    /// Deepest fragment nesting that is still crawled.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The content host.
    #[must_use]
    pub fn host(&self) -> &Url {
        &self.host
    }

    /// Where snapshots are written.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Generates one page.
    ///
    /// A failure to fetch the page itself is logged and yields an empty
    /// manifest; every other failure only drops the affected item.
    #[instrument(skip(self), fields(host = %self.host))]
    pub async fn generate(&self, path: &str) -> AssetManifest {
        match self.try_generate(path).await {
            Ok(manifest) => manifest,
            Err(error) => {
                error!(path, error = %error, "Page generation failed");
                AssetManifest::new()
            }
        }
    }

    /// Generates one page, reporting a top-level fetch failure as an error.
    ///
    /// # Errors
    ///
    /// Returns `CrawlError::Fetch` when the page itself cannot be fetched.
    pub async fn try_generate(&self, path: &str) -> Result<AssetManifest, CrawlError> {
        let path = normalize_link(path);
        let path = if path.is_empty() { "/".to_string() } else { path };

        let markup = self.fetch_page(&path).await?;
        let summary = PageSummary::extract(&markup);
        let kind = TemplateKind::parse(summary.template.as_deref());
        info!(path = %path, template = %kind, "Running generator");

        let mut state = CrawlState::new(&path);
        self.collect(kind, &summary, &mut state, 0).await;
        state.manifest.push(format!("{path}{PLAIN_HTML_SUFFIX}"));

        if let Err(error) = self.persist(&path, &markup, &summary.fragments).await {
            error!(path = %path, error = %error, "Failed to write page snapshot");
        }

        info!(path = %path, assets = state.manifest.len(), "Page generated");
        Ok(state.manifest)
    }

    /// Generates several pages in order, continuing after failures.
    ///
    /// Returns the combined manifest.
    pub async fn generate_all(&self, paths: &[String]) -> AssetManifest {
        let mut combined = AssetManifest::new();
        let mut failed = 0_usize;
        for path in paths {
            match self.try_generate(path).await {
                Ok(manifest) => combined.merge(manifest),
                Err(error) => {
                    failed += 1;
                    error!(path = %path, error = %error, "Page generation failed");
                }
            }
        }
        info!(pages = paths.len(), failed, assets = combined.len(), "Generation complete");
        combined
    }

    /// Runs the template handler of a page, then crawls its fragments.
    fn collect<'a>(
        &'a self,
        kind: TemplateKind,
        summary: &'a PageSummary,
        state: &'a mut CrawlState,
        depth: usize,
    ) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            debug!(template = %kind, depth, "dispatching template handler");
            if kind.collects_dashboard_media() {
                state.manifest.extend(&summary.dashboard_videos);
                state.manifest.extend(&summary.dashboard_images);
            }
            if kind.collects_sheets() {
                self.collect_sheets(&summary.sheet_links, &mut state.manifest)
                    .await;
            }
            if kind.collects_page_media() {
                state.manifest.extend(&summary.images);
                state.manifest.extend(&summary.videos);
            }
            if kind.uses_carousel() {
                state.manifest.extend(CAROUSEL_ASSETS);
            }
            if kind.uses_recognitions_styles() {
                state.manifest.push(NOT_FOUND_ICON);
                state.manifest.extend(FONT_ASSETS);
            }
            self.crawl_fragments(&summary.fragments, state, depth).await;
        })
    }

    async fn crawl_fragments(&self, fragments: &[FragmentLink], state: &mut CrawlState, depth: usize) {
        if fragments.is_empty() {
            return;
        }
        debug!(count = fragments.len(), depth, "Found fragments to process");

        for link in fragments {
            if depth >= self.max_depth {
                warn!(fragment = %link.path, max_depth = self.max_depth, "Fragment depth limit reached; skipping");
                continue;
            }
            if !state.visited.insert(link.path.clone()) {
                debug!(fragment = %link.path, "Fragment already visited; skipping");
                continue;
            }
            if let Err(error) = self.crawl_fragment(&link.path, state, depth + 1).await {
                warn!(fragment = %link.path, error = %error, "Error processing fragment");
            }
        }
        state.manifest.extend(FRAGMENT_ASSETS);
    }

    #[instrument(skip(self, state))]
    async fn crawl_fragment(
        &self,
        path: &str,
        state: &mut CrawlState,
        depth: usize,
    ) -> Result<(), CrawlError> {
        let markup = self.fetch_page(path).await?;
        let summary = PageSummary::extract(&markup);
        let kind = TemplateKind::parse(summary.template.as_deref());
        info!(fragment = path, template = %kind, "Processing fragment");

        self.collect(kind, &summary, state, depth).await;
        state.manifest.push(format!("{path}{HTML_SUFFIX}"));
        state.manifest.push(format!("{path}{PLAIN_HTML_SUFFIX}"));

        if let Err(error) = self.persist(path, &markup, &summary.fragments).await {
            warn!(fragment = path, error = %error, "Failed to write fragment snapshot");
        }
        Ok(())
    }

    /// Records the sheet links, the sheets' explicit images and the profile
    /// photos that exist on the image host.
    async fn collect_sheets(&self, sheet_links: &[String], manifest: &mut AssetManifest) {
        if sheet_links.is_empty() {
            warn!("No sheet data available during HTML generation");
            return;
        }

        for link in sheet_links {
            manifest.push(link.as_str());
            let url = match self.client.resolve(&self.host, link) {
                Ok(url) => url,
                Err(error) => {
                    warn!(sheet = %link, error = %error, "Invalid sheet link; skipping");
                    continue;
                }
            };
            let entries = match self.client.fetch_sheet(&url).await {
                Ok(entries) => entries,
                Err(error) => {
                    warn!(sheet = %link, error = %error, "Error while processing sheet");
                    continue;
                }
            };

            for entry in &entries {
                if let Some(image) = entry.field(columns::IMAGE_URL) {
                    manifest.push(extract_media_from_path(&image));
                }
                let Some(ldap) = entry.field(columns::LDAP) else {
                    continue;
                };
                for profile in profile_image_paths(&ldap) {
                    if manifest.contains(&profile) {
                        continue;
                    }
                    if self.profile_image_exists(&profile).await {
                        manifest.push(profile);
                    } else {
                        debug!(profile = %profile, "Profile image not found; excluded");
                    }
                }
            }
        }
    }

    async fn profile_image_exists(&self, path: &str) -> bool {
        match self.image_host.join(path) {
            Ok(url) => self.client.exists(&url, Some(PROFILE_IMAGE_REFERER)).await,
            Err(_) => false,
        }
    }

    async fn fetch_page(&self, path: &str) -> Result<String, CrawlError> {
        let url = self
            .client
            .resolve(&self.host, path)
            .map_err(|e| CrawlError::fetch(path, e))?;
        self.client
            .get_text(&url)
            .await
            .map_err(|e| CrawlError::fetch(path, e))
    }

    /// Writes the page snapshot and, best effort, its plain variant.
    async fn persist(&self, path: &str, markup: &str, fragments: &[FragmentLink]) -> Result<(), CrawlError> {
        write_snapshot(&self.output_dir, path, HTML_SUFFIX, &rewrite_links(markup, fragments)).await?;

        match self.fetch_page(&format!("{path}{PLAIN_HTML_SUFFIX}")).await {
            Ok(plain) => {
                write_snapshot(
                    &self.output_dir,
                    path,
                    PLAIN_HTML_SUFFIX,
                    &rewrite_links(&plain, fragments),
                )
                .await?;
                debug!(path, "Successfully saved plain variant");
            }
            Err(error) => warn!(path, error = %error, "Error fetching .plain.html"),
        }
        Ok(())
    }
}
