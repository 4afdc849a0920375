use crate::crawler::Frontier;
use crate::output::CrawlStats;
use crate::robots::RobotsCache;
use crate::state::DomainRegistry;
use std::collections::HashSet;

/// All mutable state of a single crawl run
#[derive(Debug, Default)]
pub struct CrawlState {
    /// Discovered-but-not-yet-processed URLs
    pub frontier: Frontier,

    /// Canonical URLs already popped from the frontier
    visited: HashSet<String>,

    /// Hosts that already received a "new domain" priority
    pub domains: DomainRegistry,

    /// robots.txt rules per target origin
    pub robots: RobotsCache,

    /// Crawl counters and language tallies
    pub stats: CrawlStats,
}

impl CrawlState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `url` has already been popped for processing
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Records `url` as visited
    ///
    /// # Returns
    ///
    /// * `true` - First visit; the caller should process the URL
    /// * `false` - The URL was already visited and must be discarded
    pub fn mark_visited(&mut self, url: &str) -> bool {
        if self.visited.contains(url) {
            return false;
        }
        self.visited.insert(url.to_string())
    }

    /// Number of URLs visited so far (including ones that failed to fetch)
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
