//! Async HTTP client wrapping reqwest.
//!
//! Not a browser — just HTTP requests. One GET per call, bounded
//! redirects, request timeout. A transport error or non-2xx status is
//! surfaced to the caller immediately; nothing is retried.

use anyhow::{bail, Result};
use std::time::Duration;

/// Default request timeout for page fetches.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Response from a successful page fetch.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Original requested URL.
    pub url: String,
    /// Final URL after redirects.
    pub final_url: String,
    /// HTTP status code.
    pub status: u16,
    /// Content-Type header, if present.
    pub content_type: Option<String>,
    /// Response body as text.
    pub body: String,
}

/// HTTP client for fetching remote documents.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a new HTTP client with standard Chrome user-agent.
    pub fn new(timeout_ms: u64) -> Self {
        let ua = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                  AppleWebKit/537.36 (KHTML, like Gecko) \
                  Chrome/131.0.0.0 Safari/537.36";

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(ua)
            .build()
            .unwrap_or_default();

        Self { client }
    }

    /// Perform a single GET request and return the body as text.
    ///
    /// Non-2xx responses are errors: the caller gets either a usable
    /// document or a failure, never a partial result.
    pub async fn get(&self, url: &str) -> Result<FetchedPage> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        let final_url = response.url().to_string();

        if !status.is_success() {
            bail!("request to {url} returned status {status}");
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let body = response.text().await?;

        Ok(FetchedPage {
            url: url.to_string(),
            final_url,
            status: status.as_u16(),
            content_type,
            body,
        })
    }
}
