//! HTTP fetcher for static pages
//!
//! The navigation menu is server-rendered, so discovery uses plain GET
//! requests instead of the browser. Any failure is fatal: there is no retry.

use crate::config::HttpConfig;
use crate::{Result, ScrapeError};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use catalog_harvest::config::HttpConfig;
/// use catalog_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page and returns its body
///
/// # Returns
///
/// * `Ok(String)` - Body of a 2xx response
/// * `Err(ScrapeError::Http)` - Connection failure, timeout or non-2xx status
pub async fn fetch_html(client: &Client, url: &Url) -> Result<String> {
    tracing::debug!("GET {}", url);

    let http_error = |source| ScrapeError::Http {
        url: url.to_string(),
        source,
    };

    let response = client
        .get(url.clone())
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(http_error)?;

    response.text().await.map_err(http_error)
}
