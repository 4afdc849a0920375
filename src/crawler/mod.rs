//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - Seed acquisition from a search page or a static list
//! - HTTP fetching with a fixed inter-request delay
//! - HTML parsing and link extraction
//! - The priority frontier and link scoring
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod scorer;
mod seeds;

pub use coordinator::{Coordinator, CrawlPhase, PageRecord, StepOutcome};
pub use fetcher::{build_http_client, is_html_content_type, FetchedPage, Fetcher, HttpFetcher};
pub use frontier::{Frontier, FrontierEntry};
pub use parser::{extract_links, is_blocked_extension, parse_document, Document, BLOCKED_EXTENSIONS};
pub use scorer::{LinkClass, PriorityScorer, RankPermutation};
pub use seeds::{extract_result_links, seed_provider, SearchPageSeeds, SeedProvider, StaticSeeds};

use crate::config::Config;
use crate::output::CrawlStats;
use crate::BabelError;
use std::time::Duration;

/// Asks the configured seed provider for the initial URLs
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `query` - Search query; ignored when static seeds are configured
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Seed URLs, possibly empty
/// * `Err(BabelError)` - The provider failed; the crawl cannot start
pub async fn acquire_seeds(config: &Config, query: &str) -> Result<Vec<String>, BabelError> {
    let provider = seed_provider(
        &config.seeds,
        &config.user_agent,
        Duration::from_millis(config.crawler.request_timeout_ms),
    )?;

    let seeds = provider.search(query, config.seeds.count).await?;
    tracing::info!("Acquired {} seed URLs", seeds.len());
    for seed in &seeds {
        tracing::debug!("Seed: {}", seed);
    }

    Ok(seeds)
}

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Acquire seed URLs for the query
/// 2. Build the HTTP collaborators
/// 3. Crawl until the frontier is empty or the budget is spent
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `query` - Search query used to find seeds
///
/// # Returns
///
/// * `Ok(CrawlStats)` - Final counters of the run
/// * `Err(BabelError)` - Seed acquisition or client setup failed
///
/// # Example
///
/// ```no_run
/// use babel_ripple::config::Config;
/// use babel_ripple::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let stats = run_crawl(&Config::default(), "wiadomości").await?;
/// println!("crawled {} pages", stats.crawled);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config, query: &str) -> Result<CrawlStats, BabelError> {
    let seeds = acquire_seeds(config, query).await?;

    let mut coordinator = Coordinator::new(config)?;
    if coordinator.seed(&seeds) == 0 {
        tracing::warn!("No usable seed URLs, nothing to crawl");
    }

    Ok(coordinator.run().await.clone())
}
