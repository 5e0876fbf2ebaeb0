//! HTTP source for the USGS GeoJSON summary feeds.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::config::FeedConfig;
use crate::error::{QuakeError, Result};
use crate::feed::FeedSource;
use crate::models::{Magnitude, Past};

/// Fetches feed documents from `earthquake.usgs.gov` (or a compatible mirror).
pub struct UsgsFeedSource {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl UsgsFeedSource {
    /// Create a source for the public USGS feeds.
    pub fn new() -> Result<Self> {
        Self::with_base_url(FeedConfig::USGS_FEED_BASE)
    }

    /// Create a source rooted at a custom base URL.
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Self::with_options(base_url, FeedConfig::REQUEST_TIMEOUT)
    }

    /// Create a source with a custom base URL and request timeout.
    pub fn with_options(base_url: &str, timeout: Duration) -> Result<Self> {
        // A trailing slash keeps the last path segment when joining.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized).map_err(|e| QuakeError::InvalidArgument {
            field: "base_url".to_string(),
            message: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(FeedConfig::USER_AGENT)
            .build()
            .map_err(|e| QuakeError::Network {
                message: format!("Failed to create HTTP client: {}", e),
                status_code: None,
            })?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// Resolve the document URL for a feed.
    pub fn feed_url(&self, magnitude: Magnitude, past: Past) -> Result<Url> {
        let file = format!("{}_{}.geojson", magnitude.feed_segment(), past.feed_segment());
        self.base_url
            .join(&file)
            .map_err(|e| QuakeError::InvalidArgument {
                field: "base_url".to_string(),
                message: e.to_string(),
            })
    }

    fn transport_error(&self, err: reqwest::Error) -> QuakeError {
        if err.is_timeout() {
            QuakeError::Timeout(self.timeout)
        } else {
            err.into()
        }
    }
}

#[async_trait]
impl FeedSource for UsgsFeedSource {
    async fn fetch(&self, magnitude: Magnitude, past: Past) -> Result<Vec<u8>> {
        let url = self.feed_url(magnitude, past)?;
        debug!(%url, "Fetching earthquake feed");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(QuakeError::Network {
                message: format!("GET {} returned {}", url, status),
                status_code: Some(status.as_u16()),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;
        Ok(body.to_vec())
    }
}
