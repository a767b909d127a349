//! Error types for the offline generator.

use std::path::PathBuf;

use thiserror::Error;

use crate::fetch::FetchError;

/// Errors that abort one page or fragment.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The page (or fragment) itself could not be fetched.
    #[error("failed to fetch {path}: {source}")]
    Fetch {
        /// Root-relative path of the page.
        path: String,
        /// The underlying fetch error.
        #[source]
        source: FetchError,
    },

    /// A snapshot or manifest file could not be written.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// File being written.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The path would be written outside the output directory.
    #[error("refusing to write outside the output directory: {path}")]
    UnsafePath {
        /// The offending page path.
        path: String,
    },

    /// The manifest could not be serialised.
    #[error("failed to serialise manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

impl CrawlError {
    /// Creates a fetch error for `path`.
    pub fn fetch(path: impl Into<String>, source: FetchError) -> Self {
        Self::Fetch {
            path: path.into(),
            source,
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates an unsafe path error.
    pub fn unsafe_path(path: impl Into<String>) -> Self {
        Self::UnsafePath { path: path.into() }
    }
}
