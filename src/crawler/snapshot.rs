//! Writing page snapshots under the output directory.

use std::path::{Component, Path, PathBuf};

use tracing::debug;

use super::error::CrawlError;

/// Maps a root-relative page path to its snapshot file.
///
/// `/content/screens/main` with suffix `.html` becomes
/// `<output_dir>/content/screens/main.html`. Paths escaping the output
/// directory are rejected.
pub(super) fn snapshot_path(
    output_dir: &Path,
    page_path: &str,
    suffix: &str,
) -> Result<PathBuf, CrawlError> {
    let relative = page_path.trim_start_matches('/');
    let relative = if relative.is_empty() { "index" } else { relative };
    let file = format!("{relative}{suffix}");

    let safe = Path::new(&file)
        .components()
        .all(|component| matches!(component, Component::Normal(_)));
    if !safe {
        return Err(CrawlError::unsafe_path(page_path));
    }
    Ok(output_dir.join(file))
}

/// Writes `content` to the snapshot of `page_path`, creating directories.
pub(super) async fn write_snapshot(
    output_dir: &Path,
    page_path: &str,
    suffix: &str,
    content: &str,
) -> Result<PathBuf, CrawlError> {
    let path = snapshot_path(output_dir, page_path, suffix)?;
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| CrawlError::io(parent, e))?;
    }
    tokio::fs::write(&path, content)
        .await
        .map_err(|e| CrawlError::io(&path, e))?;
    debug!(path = %path.display(), bytes = content.len(), "snapshot written");
    Ok(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_path_mirrors_page_path() {
        let path = snapshot_path(Path::new("/out"), "/content/screens/main", ".plain.html").unwrap();
        assert_eq!(path, PathBuf::from("/out/content/screens/main.plain.html"));
    }

    #[test]
    fn test_root_page_is_index() {
        let path = snapshot_path(Path::new("/out"), "/", ".html").unwrap();
        assert_eq!(path, PathBuf::from("/out/index.html"));
    }

    #[test]
    fn test_parent_components_are_rejected() {
        assert!(matches!(
            snapshot_path(Path::new("/out"), "/content/../../etc/passwd", ".html"),
            Err(CrawlError::UnsafePath { .. })
        ));
    }

    #[tokio::test]
    async fn test_write_snapshot_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let written = write_snapshot(dir.path(), "/a/b/page", ".html", "<html></html>")
            .await
            .unwrap();
        assert_eq!(std::fs::read_to_string(written).unwrap(), "<html></html>");
    }
}
