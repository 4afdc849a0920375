//! Crawl counters and language tallies

use crate::language::LanguageBucket;
use std::collections::BTreeMap;

/// Counters accumulated over a crawl run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Pages fetched and parsed successfully
    pub crawled: u64,

    /// Pages whose language was determined
    pub sampled: u64,

    /// Sampled pages per language bucket
    languages: BTreeMap<LanguageBucket, u64>,
}

impl CrawlStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one successfully crawled page
    pub fn record_crawled(&mut self) {
        self.crawled += 1;
    }

    /// Counts one sampled page in `bucket`
    pub fn record_sample(&mut self, bucket: LanguageBucket) {
        self.sampled += 1;
        *self.languages.entry(bucket).or_insert(0) += 1;
    }

    /// Number of sampled pages in `bucket`
    pub fn count(&self, bucket: LanguageBucket) -> u64 {
        self.languages.get(&bucket).copied().unwrap_or(0)
    }

    /// Share of sampled pages in `bucket`
    ///
    /// # Returns
    ///
    /// * `Some(f64)` - Fraction in `[0, 1]`
    /// * `None` - No page has been sampled yet
    pub fn fraction(&self, bucket: LanguageBucket) -> Option<f64> {
        if self.sampled == 0 {
            return None;
        }
        Some(self.count(bucket) as f64 / self.sampled as f64)
    }
}
