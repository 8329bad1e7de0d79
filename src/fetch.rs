//! HTTP transport behind a small capability trait.
//!
//! Collections and document articles never talk to the network directly;
//! they go through a [`Fetcher`]. The default implementation,
//! [`HttpFetcher`], performs one blocking `GET` per call with the timeout
//! and user agent from [`ClientConfig`]. Any `Fn(&Url) -> Result<String>`
//! closure is a fetcher too, which is how offline callers inject canned
//! responses.

use crate::config::ClientConfig;
use crate::error::{NewsError, Result};
use crate::utils::truncate_for_log;
use reqwest::blocking::Client;
use std::time::Instant;
use tracing::{debug, instrument, trace};
use url::Url;

/// Retrieves the body of a URL.
///
/// Implementations must report transport failures and non-success
/// responses as [`NewsError::Fetch`].
pub trait Fetcher {
    /// Perform a single `GET` of `url` and return the response body.
    fn get(&self, url: &Url) -> Result<String>;
}

impl<F> Fetcher for F
where
    F: Fn(&Url) -> Result<String>,
{
    fn get(&self, url: &Url) -> Result<String> {
        self(url)
    }
}

/// Blocking `reqwest` fetcher.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher using the timeout and user agent of `config`.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| NewsError::configuration(format!("cannot build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Wrap an already configured client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Fetcher for HttpFetcher {
    #[instrument(level = "debug", skip_all, fields(%url))]
    fn get(&self, url: &Url) -> Result<String> {
        let t0 = Instant::now();
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| NewsError::fetch(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "Non-success response");
            return Err(NewsError::fetch(url.as_str(), format!("HTTP status {status}")));
        }

        let body = response
            .text()
            .map_err(|e| NewsError::fetch(url.as_str(), e))?;
        debug!(
            status = status.as_u16(),
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched"
        );
        trace!(body = %truncate_for_log(&body, 300), "Response preview");
        Ok(body)
    }
}
