//! Seed URL providers
//!
//! The crawl starts from an ordered list of URLs for a text query. Seeds come
//! either from a fixed list in the configuration or from scraping a search
//! engine's HTML results page.

use crate::config::{SeedsConfig, UserAgentConfig};
use crate::SeedError;
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// Query parameters search engines use to carry the real target of a result link
const REDIRECT_PARAMS: &[&str] = &["uddg", "url", "q"];

/// Produces the initial frontier for a query
#[async_trait]
pub trait SeedProvider: Send + Sync {
    /// Returns up to `count` seed URLs for `query`, best match first
    async fn search(&self, query: &str, count: usize) -> Result<Vec<String>, SeedError>;
}

/// Seeds listed in the configuration; the query is ignored
#[derive(Debug, Clone)]
pub struct StaticSeeds {
    urls: Vec<String>,
}

impl StaticSeeds {
    pub fn new(urls: Vec<String>) -> Self {
        Self { urls }
    }
}

#[async_trait]
impl SeedProvider for StaticSeeds {
    async fn search(&self, _query: &str, count: usize) -> Result<Vec<String>, SeedError> {
        Ok(self.urls.iter().take(count).cloned().collect())
    }
}

/// Scrapes result links from a search engine's HTML results page
pub struct SearchPageSeeds {
    client: Client,
    template: String,
}

impl SearchPageSeeds {
    /// Creates a provider for a results URL containing a `{query}` placeholder
    pub fn new(
        template: impl Into<String>,
        user_agent: &UserAgentConfig,
        timeout: Duration,
    ) -> Result<Self, SeedError> {
        let client = Client::builder()
            .user_agent(user_agent.header_value())
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            template: template.into(),
        })
    }

    /// Builds the results page URL for `query`
    pub fn search_url(&self, query: &str) -> Result<Url, SeedError> {
        let encoded: String = url::form_urlencoded::byte_serialize(query.trim().as_bytes()).collect();
        let raw = self.template.replace("{query}", &encoded);
        Url::parse(&raw).map_err(|e| SeedError::InvalidUrl(format!("{}: {}", raw, e)))
    }
}

#[async_trait]
impl SeedProvider for SearchPageSeeds {
    async fn search(&self, query: &str, count: usize) -> Result<Vec<String>, SeedError> {
        let search_url = self.search_url(query)?;
        tracing::info!("Searching for seeds: {}", search_url);

        let response = self.client.get(search_url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SeedError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        Ok(extract_result_links(&body, &search_url, count))
    }
}

/// Pulls result URLs out of a search results page
///
/// Relative and redirect links are resolved to their targets; links back to
/// the search engine itself, non-HTTP links and duplicates are dropped.
pub fn extract_result_links(html: &str, search_url: &Url, count: usize) -> Vec<String> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let search_host = search_url.host_str().unwrap_or_default();
    let mut seen = HashSet::new();
    let mut results = Vec::new();

    for href in document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
    {
        let Ok(resolved) = search_url.join(href.trim()) else {
            continue;
        };
        let target = unwrap_redirect(&resolved).unwrap_or(resolved);

        if !matches!(target.scheme(), "http" | "https") {
            continue;
        }
        match target.host_str() {
            Some(host) if !host.is_empty() && !same_site(host, search_host) => {}
            _ => continue,
        }

        let target = target.to_string();
        if seen.insert(target.clone()) {
            results.push(target);
            if results.len() >= count {
                break;
            }
        }
    }

    results
}

/// Returns the absolute URL carried in a redirect parameter, if any
fn unwrap_redirect(link: &Url) -> Option<Url> {
    link.query_pairs()
        .find(|(key, _)| REDIRECT_PARAMS.contains(&key.as_ref()))
        .and_then(|(_, value)| Url::parse(&value).ok())
        .filter(|target| matches!(target.scheme(), "http" | "https"))
}

/// `html.duckduckgo.com` and `duckduckgo.com` count as the same engine
fn same_site(host: &str, search_host: &str) -> bool {
    let strip = |h: &str| {
        h.trim_start_matches("www.")
            .trim_start_matches("html.")
            .to_ascii_lowercase()
    };
    strip(host) == strip(search_host)
}

/// Picks the seed provider described by the configuration
pub fn seed_provider(
    config: &SeedsConfig,
    user_agent: &UserAgentConfig,
    timeout: Duration,
) -> Result<Box<dyn SeedProvider>, SeedError> {
    if config.urls.is_empty() {
        Ok(Box::new(SearchPageSeeds::new(
            config.search_url.clone(),
            user_agent,
            timeout,
        )?))
    } else {
        Ok(Box::new(StaticSeeds::new(config.urls.clone())))
    }
}
