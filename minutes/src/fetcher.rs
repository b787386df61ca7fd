//! HTTP fetcher for the live minutes page.
//!
//! Retrieves the raw page text with a pooled `reqwest` client. Any status
//! outside the 2xx range is reported as [`FetchError::Unavailable`]; no retry
//! is attempted, callers poll again on their own schedule.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

/// Default HTTP request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const USER_AGENT: &str = concat!("auspol-minutes/", env!("CARGO_PKG_VERSION"));

/// Errors that can occur while fetching the page.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("minutes unavailable: {url} returned {status}")]
    Unavailable { url: String, status: u16 },
}

/// Fetches one minutes page URL.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    url: String,
}

impl Fetcher {
    /// Creates a fetcher for `url` with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// The page URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetches the page and returns its text.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Unavailable` for a non-success status and
    /// `FetchError::Http` for transport failures.
    pub async fn fetch_page(&self) -> Result<String, FetchError> {
        debug!(url = %self.url, "Fetching live minutes");

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!(url = %self.url, status = status.as_u16(), "Minutes page unavailable");
            return Err(FetchError::Unavailable {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "Fetched live minutes");
        Ok(body)
    }
}
