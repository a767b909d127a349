//! Preview and publish workflows for recognitions sheets and channels.
//!
//! A recognitions channel is a page `<dir>/main` backed by the sheet
//! `<dir>/recognitions.json`. Previewing or publishing one side usually
//! means acting on the other too.

use tracing::{info, instrument};
use url::Url;

use super::client::{AdminAction, AdminClient, AdminTarget};
use super::error::AdminError;

const SHEET_SUFFIX: &str = "recognitions.json";
const PAGE_SUFFIX: &str = "main";
const DASHBOARDS_MARKER: &str = "dashboards";

/// What a workflow did and where the user should go next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowReport {
    /// Actions performed, in order, with their document path.
    pub actions: Vec<(AdminAction, String)>,
    /// Page to open once done.
    pub redirect: Url,
}

/// Page path of the channel a sheet belongs to.
///
/// ```
/// use recognitions_core::admin::page_path_for_sheet;
///
/// assert_eq!(
///     page_path_for_sheet("/content/org-a/recognitions.json").unwrap(),
///     "/content/org-a/main"
/// );
/// ```
///
/// # Errors
///
/// Returns `AdminError::UnexpectedPath` unless the path ends with
/// `recognitions.json`.
pub fn page_path_for_sheet(sheet_path: &str) -> Result<String, AdminError> {
    sheet_path
        .strip_suffix(SHEET_SUFFIX)
        .map(|dir| format!("{dir}{PAGE_SUFFIX}"))
        .ok_or_else(|| AdminError::UnexpectedPath {
            path: sheet_path.to_string(),
            expected: SHEET_SUFFIX,
        })
}

/// Sheet path backing a channel page.
///
/// # Errors
///
/// Returns `AdminError::UnexpectedPath` unless the path ends with `main`.
pub fn sheet_path_for_page(page_path: &str) -> Result<String, AdminError> {
    page_path
        .strip_suffix(PAGE_SUFFIX)
        .map(|dir| format!("{dir}{SHEET_SUFFIX}"))
        .ok_or_else(|| AdminError::UnexpectedPath {
            path: page_path.to_string(),
            expected: PAGE_SUFFIX,
        })
}

/// Returns true for dashboard channels, which have no backing sheet.
#[must_use]
pub fn is_dashboard_document(path: &str) -> bool {
    path.contains(DASHBOARDS_MARKER)
}

/// Previews a sheet and its channel page, purging both from the cache.
///
/// The sheet is found from its editor URL; the redirect points at the
/// channel page on the sidekick's preview host.
///
/// # Errors
///
/// Returns `AdminError` when the status lookup fails, the document has no
/// preview URL, an action is rejected, or the preview host is unknown.
#[instrument(skip(admin, target), fields(owner = %target.owner, repo = %target.repo))]
pub async fn preview_sheet(
    admin: &AdminClient,
    target: &AdminTarget,
    edit_url: &str,
) -> Result<WorkflowReport, AdminError> {
    let status = admin.status(target, edit_url).await?;
    let sheet_path = status_path(status.preview_url(), "preview")?;
    let page_path = page_path_for_sheet(&sheet_path)?;

    let mut actions = Vec::new();
    for path in [&sheet_path, &page_path] {
        admin.preview(target, path).await?;
        actions.push((AdminAction::Preview, path.clone()));
        admin.purge_cache(target, path).await?;
        actions.push((AdminAction::PurgeCache, path.clone()));
    }

    let config = admin.sidekick_config(target).await?;
    let preview_host = config
        .preview_host
        .ok_or(AdminError::MissingStatusUrl { which: "preview host" })?;
    let redirect = host_url(&preview_host, &page_path)?;
    info!(redirect = %redirect, "Sheet previewed");
    Ok(WorkflowReport { actions, redirect })
}

/// Publishes a sheet and purges it from the cache.
///
/// The document must already be live. The redirect points at the channel
/// page on `prod_host`.
///
/// # Errors
///
/// Returns `AdminError` when the status lookup fails, the document is not
/// live, or an action is rejected.
#[instrument(skip(admin, target), fields(owner = %target.owner, repo = %target.repo))]
pub async fn publish_sheet(
    admin: &AdminClient,
    target: &AdminTarget,
    edit_url: &str,
    prod_host: &str,
) -> Result<WorkflowReport, AdminError> {
    let status = admin.status(target, edit_url).await?;
    if status.live_url().is_none() {
        return Err(AdminError::MissingStatusUrl { which: "live" });
    }
    let sheet_path = status_path(status.preview_url(), "preview")?;
    let page_path = page_path_for_sheet(&sheet_path)?;

    admin.publish(target, &sheet_path).await?;
    admin.purge_cache(target, &sheet_path).await?;
    let actions = vec![
        (AdminAction::Publish, sheet_path.clone()),
        (AdminAction::PurgeCache, sheet_path),
    ];

    let redirect = host_url(prod_host, &page_path)?;
    info!(redirect = %redirect, "Sheet published");
    Ok(WorkflowReport { actions, redirect })
}

/// Publishes a channel page and, unless it is a dashboard, its sheet.
///
/// # Errors
///
/// Returns `AdminError` when an action is rejected or the page path does
/// not follow the `<dir>/main` convention.
#[instrument(skip(admin, target), fields(owner = %target.owner, repo = %target.repo))]
pub async fn publish_channel(
    admin: &AdminClient,
    target: &AdminTarget,
    web_path: &str,
    prod_host: &str,
) -> Result<WorkflowReport, AdminError> {
    admin.publish(target, web_path).await?;
    let mut actions = vec![(AdminAction::Publish, web_path.to_string())];

    if !is_dashboard_document(web_path) {
        let sheet_path = sheet_path_for_page(web_path)?;
        admin.publish(target, &sheet_path).await?;
        actions.push((AdminAction::Publish, sheet_path));
    }

    let redirect = host_url(prod_host, web_path)?;
    info!(redirect = %redirect, "Channel published");
    Ok(WorkflowReport { actions, redirect })
}

fn status_path(url: Option<&str>, which: &'static str) -> Result<String, AdminError> {
    let url = url.ok_or(AdminError::MissingStatusUrl { which })?;
    let parsed = Url::parse(url).map_err(|_| AdminError::invalid_url(url))?;
    Ok(parsed.path().to_string())
}

fn host_url(host: &str, path: &str) -> Result<Url, AdminError> {
    let host = host
        .trim()
        .trim_start_matches("https://")
        .trim_end_matches('/');
    let text = format!("https://{host}{path}");
    Url::parse(&text).map_err(|_| AdminError::invalid_url(text))
}
