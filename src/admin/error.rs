//! Error types for admin API actions.

use thiserror::Error;

use crate::fetch::FetchError;

/// Errors from admin API calls and the publishing workflows.
#[derive(Debug, Error)]
pub enum AdminError {
    /// The admin API request failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// An action was rejected by the admin API.
    #[error("Could not {action} {path}: {source}")]
    Action {
        /// The action attempted.
        action: &'static str,
        /// Document path.
        path: String,
        /// The failed request.
        #[source]
        source: FetchError,
    },

    /// The response body is not the expected JSON.
    #[error("unexpected admin response from {url}: {reason}")]
    InvalidResponse {
        /// Endpoint called.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// The document status lacks a URL the workflow needs.
    #[error("{which} URL not present in document status")]
    MissingStatusUrl {
        /// `preview` or `live`.
        which: &'static str,
    },

    /// A path does not follow the sheet/page naming convention.
    #[error("path {path} does not end with {expected}")]
    UnexpectedPath {
        /// The path given.
        path: String,
        /// Required suffix.
        expected: &'static str,
    },

    /// A URL could not be built.
    #[error("invalid admin URL: {url}")]
    InvalidUrl {
        /// The URL text.
        url: String,
    },
}

impl AdminError {
    /// Creates an action failure.
    pub fn action(action: &'static str, path: impl Into<String>, source: FetchError) -> Self {
        Self::Action {
            action,
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid response error.
    pub fn invalid_response(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }
}
