//! The de-duplicated asset manifest.

use std::collections::HashSet;
use std::path::Path;

use serde::{Serialize, Serializer};
use tracing::debug;

use super::error::CrawlError;

/// Root-relative asset paths in first-seen order, each listed once.
///
/// ```
/// use recognitions_core::crawler::AssetManifest;
///
/// let mut manifest = AssetManifest::new();
/// assert!(manifest.push("/media_a.png"));
/// assert!(!manifest.push("/media_a.png"));
/// manifest.push("/blocks/fragment/fragment.js");
/// assert_eq!(manifest.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetManifest {
    entries: Vec<String>,
    seen: HashSet<String>,
}

impl AssetManifest {
    /// Creates an empty manifest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a path unless it is blank or already listed. Returns true if added.
    pub fn push(&mut self, path: impl Into<String>) -> bool {
        let path = path.into();
        if path.trim().is_empty() || self.seen.contains(&path) {
            return false;
        }
        self.seen.insert(path.clone());
        self.entries.push(path);
        true
    }

    /// Adds every path in order.
    pub fn extend<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for path in paths {
            self.push(path);
        }
    }

    /// Appends another manifest's entries that are not listed yet.
    pub fn merge(&mut self, other: Self) {
        self.extend(other.entries);
    }

    /// Returns true when `path` is listed.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.seen.contains(path)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the manifest is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entries, in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Consumes the manifest.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.entries
    }

    /// Renders the manifest as a pretty JSON array.
    ///
    /// # Errors
    ///
    /// Returns `CrawlError::Manifest` if serialisation fails.
    pub fn to_json(&self) -> Result<String, CrawlError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the manifest as JSON, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns `CrawlError::Io` if the file cannot be written.
    pub async fn write_json(&self, path: &Path) -> Result<(), CrawlError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CrawlError::io(parent, e))?;
        }
        tokio::fs::write(path, self.to_json()?)
            .await
            .map_err(|e| CrawlError::io(path, e))?;
        debug!(path = %path.display(), entries = self.len(), "manifest written");
        Ok(())
    }
}

impl Serialize for AssetManifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'a> IntoIterator for &'a AssetManifest {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
