//! Output module for crawl results
//!
//! This module handles:
//! - Accumulating crawl counters and language tallies
//! - Reporting the final crawl summary

pub mod stats;

pub use stats::CrawlStats;

use crate::language::LanguageBucket;
use std::time::Duration;

/// Formats a bucket's share of sampled pages, or `n/a` when nothing was sampled
pub fn format_fraction(stats: &CrawlStats, bucket: LanguageBucket) -> String {
    match stats.fraction(bucket) {
        Some(fraction) => format!("{:.4}", fraction),
        None => "n/a".to_string(),
    }
}

/// Builds the summary lines reported at the end of a crawl
pub fn summary_lines(stats: &CrawlStats, elapsed: Duration) -> Vec<String> {
    let counts = LanguageBucket::ALL
        .iter()
        .map(|bucket| format!("{}: {}", bucket, stats.count(*bucket)))
        .collect::<Vec<_>>()
        .join(", ");

    let fractions = LanguageBucket::ALL
        .iter()
        .map(|bucket| format!("{}: {}", bucket, format_fraction(stats, *bucket)))
        .collect::<Vec<_>>()
        .join(", ");

    vec![
        format!(
            "crawled: {}, sampled: {}, {}",
            stats.crawled, stats.sampled, counts
        ),
        format!(
            "crawled: {}, sampled: {}, {}",
            stats.crawled, stats.sampled, fractions
        ),
        format!("program took {:.2}s", elapsed.as_secs_f64()),
    ]
}

/// Logs the crawl summary
pub fn print_summary(stats: &CrawlStats, elapsed: Duration) {
    for line in summary_lines(stats, elapsed) {
        tracing::info!("{}", line);
    }
}
