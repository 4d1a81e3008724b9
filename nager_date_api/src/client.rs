//! HTTP client for the Nager.Date public holiday API.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{types::Holiday, Error};

const DEFAULT_BASE_URL: &str = "https://date.nager.at";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("canholidays/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the Nager.Date v3 REST API.
///
/// Each request builds a fresh `reqwest::Client` with the configured timeout,
/// so a `Client` holds no connection state and is cheap to clone.
#[derive(Clone, Debug)]
pub struct Client {
    /// Base URL for the API. Defaults to `https://date.nager.at`.
    base_api_url: String,
    timeout: Duration,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at the production Nager.Date API.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_api_url: base_url.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds `{base}/api/v3/...segments`. Each segment is percent-encoded, so
    /// free text such as a user-typed year cannot alter the path.
    fn get_url(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = Url::parse(&self.base_api_url).map_err(|e| {
            tracing::error!("Invalid base URL {}: {}", self.base_api_url, e);
            Error::RequestFailed
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                tracing::error!("Base URL cannot carry a path: {}", self.base_api_url);
                Error::RequestFailed
            })?
            .pop_if_empty()
            .extend(["api", "v3"])
            .extend(segments);
        Ok(url)
    }

    async fn get<T>(&self, segments: &[&str]) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let url = self.get_url(segments)?;
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        tracing::debug!("GET {}", url);
        let resp = client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        if !status.is_success() {
            // The body of a rejected request is never parsed, only kept for diagnostics.
            let body = resp.text().await.unwrap_or_default();
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        let parsed = serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::RequestFailed
        })?;

        Ok(parsed)
    }

    /// Fetches the public holidays of `country_code` for `year`.
    ///
    /// `year` is passed through as-is; the API answers out-of-range or
    /// malformed years with a non-success status.
    pub async fn get_public_holidays(
        &self,
        year: &str,
        country_code: &str,
    ) -> Result<Vec<Holiday>, Error> {
        self.get::<Vec<Holiday>>(&["PublicHolidays", year, country_code])
            .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
