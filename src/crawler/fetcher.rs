//! HTTP fetcher implementation
//!
//! This module handles page requests for the crawler:
//! - Building HTTP clients with a proper user agent string
//! - A fixed pause before every request, acting as a global rate limit
//! - Rejecting responses that declare a non-HTML Content-Type
//!
//! The status code is not filtered; it is passed on and logged with the page.

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::FetchError;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

/// A successfully fetched HTML (or untyped) response
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// HTTP status code
    pub status_code: u16,
    /// Content-Type header value (empty when missing)
    pub content_type: String,
    /// Raw body
    pub body: Vec<u8>,
}

/// Retrieves pages for the crawler
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `url`
    ///
    /// # Returns
    ///
    /// * `Ok(FetchedPage)` - The response declared HTML or no Content-Type at all
    /// * `Err(FetchError)` - Network failure, timeout, or non-HTML content
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// Returns true for an empty Content-Type or one containing `text/html`
pub fn is_html_content_type(content_type: &str) -> bool {
    content_type.is_empty() || content_type.to_ascii_lowercase().contains("text/html")
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Total per-request timeout
///
/// # Example
///
/// ```no_run
/// use babel_ripple::config::UserAgentConfig;
/// use babel_ripple::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_millis(2500)).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(timeout)
        .connect_timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages over HTTP, one at a time, with a fixed pause before each request
pub struct HttpFetcher {
    client: Client,
    delay: Duration,
}

impl HttpFetcher {
    /// Creates a fetcher from crawler and user agent settings
    pub fn new(crawler: &CrawlerConfig, user_agent: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        let client = build_http_client(
            user_agent,
            Duration::from_millis(crawler.request_timeout_ms),
        )?;

        Ok(Self {
            client,
            delay: Duration::from_millis(crawler.request_delay_ms),
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Http {
                    url: url.to_string(),
                    source: e,
                }
            }
        })?;

        let status_code = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !is_html_content_type(&content_type) {
            return Err(FetchError::NotHtml {
                url: url.to_string(),
                content_type,
            });
        }

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Http {
                    url: url.to_string(),
                    source: e,
                }
            }
        })?;

        Ok(FetchedPage {
            status_code,
            content_type,
            body: body.to_vec(),
        })
    }
}
