//! HTTP client wrapper for markup, sheet and asset requests.

use std::time::Duration;

use reqwest::header::REFERER;
use reqwest::{Client, RequestBuilder};
use tracing::{debug, instrument};
use url::Url;

use super::constants::{
    CLIENT_TYPE_FRANKLIN, CLIENT_TYPE_HEADER, CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS,
};
use super::error::FetchError;
use crate::user_agent;

/// HTTP client shared by the carousel builder, the crawler and the admin tools.
///
/// Create it once and clone it freely; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a new HTTP client with default timeouts.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self::try_new_with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
            .expect("failed to build HTTP client with static configuration")
    }

    /// Creates a new HTTP client with explicit timeout values.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Network` if the underlying client cannot be built
    /// (for example when the TLS backend fails to initialise).
    pub fn try_new_with_timeouts(
        connect_timeout_secs: u64,
        read_timeout_secs: u64,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(read_timeout_secs))
            .gzip(true)
            .user_agent(user_agent::default_user_agent())
            .build()
            .map_err(|e| FetchError::network("<client builder>", e))?;
        Ok(Self { client })
    }

    /// Joins a root-relative (or absolute) path onto a host URL.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidUrl` if the combination is not a valid URL.
    pub fn resolve(&self, host: &Url, path: &str) -> Result<Url, FetchError> {
        host.join(path)
            .map_err(|_| FetchError::invalid_url(format!("{host}{path}")))
    }

    /// Fetches a URL and returns its body as text.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` on network failures, timeouts and non-2xx responses.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get_text(&self, url: &Url) -> Result<String, FetchError> {
        let response = self.send(self.client.get(url.clone()), url).await?;
        read_text(response, url).await
    }

    /// Fetches a sheet document, identifying the request as a block client.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` on network failures, timeouts and non-2xx responses.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get_sheet_text(&self, url: &Url) -> Result<String, FetchError> {
        let request = self
            .client
            .get(url.clone())
            .header(CLIENT_TYPE_HEADER, CLIENT_TYPE_FRANKLIN);
        let response = self.send(request, url).await?;
        read_text(response, url).await
    }

    /// Probes whether an asset exists (HTTP 200) at `url`.
    ///
    /// Any failure (network, timeout, non-200) is reported as `false`; the
    /// probe is best-effort by contract.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn exists(&self, url: &Url, referer: Option<&str>) -> bool {
        let mut request = self.client.get(url.clone());
        if let Some(referer) = referer {
            request = request.header(REFERER, referer);
        }
        match request.send().await {
            Ok(response) => {
                let found = response.status().as_u16() == 200;
                debug!(status = response.status().as_u16(), found, "asset probe");
                found
            }
            Err(error) => {
                debug!(error = %error, "asset probe failed");
                false
            }
        }
    }

    /// Sends an empty `POST` (admin API actions) and returns the body text.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` on network failures, timeouts and non-2xx responses.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn post(&self, url: &Url) -> Result<String, FetchError> {
        let response = self.send(self.client.post(url.clone()), url).await?;
        read_text(response, url).await
    }

    async fn send(
        &self,
        request: RequestBuilder,
        url: &Url,
    ) -> Result<reqwest::Response, FetchError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::timeout(url.as_str())
            } else {
                FetchError::network(url.as_str(), e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::http_status(url.as_str(), status.as_u16()));
        }
        debug!(status = status.as_u16(), "request succeeded");
        Ok(response)
    }
}

async fn read_text(response: reqwest::Response, url: &Url) -> Result<String, FetchError> {
    response
        .text()
        .await
        .map_err(|e| FetchError::body(url.as_str(), e))
}
