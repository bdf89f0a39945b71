//! HTTP access for tool downloads.

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use std::time::Duration;

/// Per-request timeout for downloads and release lookups.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Blocking HTTP client used by the installer.
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("driftscope/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    /// Download `url` into memory.
    pub fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send()?;

        if !response.status().is_success() {
            bail!("HTTP {} fetching {}", response.status(), url);
        }

        Ok(response.bytes()?.to_vec())
    }

    /// GET `url` and parse the body as JSON.
    ///
    /// Sends `GITHUB_TOKEN` when present to avoid API rate limits.
    pub fn fetch_json(&self, url: &str) -> Result<serde_json::Value> {
        let mut request = self.client.get(url);
        if url.starts_with("https://api.github.com/") {
            if let Ok(token) = std::env::var("GITHUB_TOKEN") {
                request = request.bearer_auth(token);
            }
        }

        let response = request.send()?;

        if !response.status().is_success() {
            bail!("HTTP {} fetching {}", response.status(), url);
        }

        response
            .json()
            .with_context(|| format!("Failed to parse JSON from {}", url))
    }
}
