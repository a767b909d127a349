//! Admin API client.

use std::fmt;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{info, instrument};
use url::Url;

use super::error::AdminError;
use crate::fetch::HttpClient;

/// Default admin API endpoint.
pub const DEFAULT_ADMIN_BASE: &str = "https://admin.hlx.page";

/// The repository a document belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminTarget {
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Branch.
    pub git_ref: String,
}

impl AdminTarget {
    /// Creates a target.
    #[must_use]
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, git_ref: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            git_ref: git_ref.into(),
        }
    }
}

/// Document actions exposed by the admin API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    /// Render the document on the preview host.
    Preview,
    /// Publish the document to the live host.
    Publish,
    /// Purge the document from the delivery cache.
    PurgeCache,
}

impl AdminAction {
    /// The API route segment.
    #[must_use]
    pub fn route(self) -> &'static str {
        match self {
            Self::Preview => "preview",
            Self::Publish => "live",
            Self::PurgeCache => "cache",
        }
    }

    fn verb(self) -> &'static str {
        match self {
            Self::Preview => "preview",
            Self::Publish => "publish",
            Self::PurgeCache => "purge cache for",
        }
    }
}

impl fmt::Display for AdminAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route())
    }
}

/// One environment entry of a document status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StatusEntry {
    /// Where the document is served in that environment.
    #[serde(default)]
    pub url: Option<String>,
}

/// Document status as reported by the admin API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStatus {
    /// Root-relative path of the document.
    #[serde(default)]
    pub web_path: Option<String>,
    /// Preview environment.
    #[serde(default)]
    pub preview: Option<StatusEntry>,
    /// Live environment.
    #[serde(default)]
    pub live: Option<StatusEntry>,
}

impl DocumentStatus {
    /// Preview URL, if the document has been previewed.
    #[must_use]
    pub fn preview_url(&self) -> Option<&str> {
        self.preview.as_ref().and_then(|entry| entry.url.as_deref())
    }

    /// Live URL, if the document has been published.
    #[must_use]
    pub fn live_url(&self) -> Option<&str> {
        self.live.as_ref().and_then(|entry| entry.url.as_deref())
    }
}

/// Sidekick project configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidekickConfig {
    /// Host serving previews.
    #[serde(default)]
    pub preview_host: Option<String>,
    /// Host serving live pages.
    #[serde(default)]
    pub live_host: Option<String>,
    /// Production host.
    #[serde(default)]
    pub host: Option<String>,
}

/// Client for the CMS admin API.
#[derive(Debug, Clone)]
pub struct AdminClient {
    client: HttpClient,
    base: Url,
}

impl AdminClient {
    /// Creates a client talking to [`DEFAULT_ADMIN_BASE`].
    #[must_use]
    #[allow(clippy::missing_panics_doc)]
    pub fn new(client: HttpClient) -> Self {
        #[allow(clippy::expect_used)]
        let base = Url::parse(DEFAULT_ADMIN_BASE).expect("default admin base is valid"); // Static URL, safe to panic
        Self { client, base }
    }

    /// Uses another admin endpoint.
    #[must_use]
    pub fn with_base(mut self, base: Url) -> Self {
        self.base = base;
        self
    }

    /// Builds `{base}/{action}/{owner}/{repo}/{ref}/{path}`.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::InvalidUrl` if the result is not a valid URL.
    pub fn action_url(
        &self,
        action: AdminAction,
        target: &AdminTarget,
        path: &str,
    ) -> Result<Url, AdminError> {
        self.endpoint(&format!(
            "{}/{}/{}/{}/{}",
            action.route(),
            target.owner,
            target.repo,
            target.git_ref,
            path.trim_start_matches('/')
        ))
    }

    /// Runs an action on a document.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Action` when the request fails or is rejected.
    #[instrument(skip(self, target), fields(owner = %target.owner, repo = %target.repo))]
    pub async fn run(
        &self,
        action: AdminAction,
        target: &AdminTarget,
        path: &str,
    ) -> Result<(), AdminError> {
        let url = self.action_url(action, target, path)?;
        self.client
            .post(&url)
            .await
            .map_err(|e| AdminError::action(action.verb(), path, e))?;
        info!(%action, path, "admin action completed");
        Ok(())
    }

    /// Previews a document.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Action` when the preview is rejected.
    pub async fn preview(&self, target: &AdminTarget, path: &str) -> Result<(), AdminError> {
        self.run(AdminAction::Preview, target, path).await
    }

    /// Publishes a document.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Action` when publishing is rejected.
    pub async fn publish(&self, target: &AdminTarget, path: &str) -> Result<(), AdminError> {
        self.run(AdminAction::Publish, target, path).await
    }

    /// Purges a document from the delivery cache.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Action` when the purge is rejected.
    pub async fn purge_cache(&self, target: &AdminTarget, path: &str) -> Result<(), AdminError> {
        self.run(AdminAction::PurgeCache, target, path).await
    }

    /// Looks up a document by its editor URL.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Fetch` on request failure and
    /// `AdminError::InvalidResponse` when the body is not a status document.
    pub async fn status(
        &self,
        target: &AdminTarget,
        edit_url: &str,
    ) -> Result<DocumentStatus, AdminError> {
        let mut url = self.endpoint(&format!(
            "status/{}/{}/{}",
            target.owner, target.repo, target.git_ref
        ))?;
        url.query_pairs_mut().append_pair("editUrl", edit_url);
        self.get_json(&url).await
    }

    /// Reads the sidekick configuration of a repository.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Fetch` on request failure and
    /// `AdminError::InvalidResponse` when the body is not a configuration.
    pub async fn sidekick_config(&self, target: &AdminTarget) -> Result<SidekickConfig, AdminError> {
        let url = self.endpoint(&format!(
            "sidekick/{}/{}/{}/config.json",
            target.owner, target.repo, target.git_ref
        ))?;
        self.get_json(&url).await
    }

    fn endpoint(&self, route: &str) -> Result<Url, AdminError> {
        let text = format!("{}/{route}", self.base.as_str().trim_end_matches('/'));
        Url::parse(&text).map_err(|_| AdminError::invalid_url(text))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, AdminError> {
        let body = self.client.get_text(url).await?;
        serde_json::from_str(&body).map_err(|e| AdminError::invalid_response(url.as_str(), e.to_string()))
    }
}
