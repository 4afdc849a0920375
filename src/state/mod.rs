//! Per-run crawl state
//!
//! Everything the crawl mutates lives in a single [`CrawlState`] owned by the
//! coordinator: the frontier, the visited set, the domain registry, the
//! robots.txt cache and the counters. Nothing outlives the run.

mod crawl_state;
mod domain_registry;

pub use crawl_state::CrawlState;
pub use domain_registry::DomainRegistry;
