//! Robots.txt caching implementation
//!
//! Rules are cached per target origin for the lifetime of a run, with
//! automatic expiration after 24 hours.

use crate::robots::{RobotsRules, RobotsSource};
use crate::url::origin_key;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use url::Url;

/// Cached robots.txt data for an origin
#[derive(Debug, Clone)]
pub struct CachedRobots {
    /// The robots.txt rules
    pub rules: RobotsRules,

    /// When the robots.txt was fetched
    pub fetched_at: DateTime<Utc>,
}

impl CachedRobots {
    /// Creates a new CachedRobots stamped with the current time
    pub fn new(rules: RobotsRules) -> Self {
        Self {
            rules,
            fetched_at: Utc::now(),
        }
    }

    /// Checks if the cached robots.txt is older than 24 hours
    pub fn is_stale(&self) -> bool {
        self.age() > Duration::hours(24)
    }

    /// Returns how long ago the robots.txt was fetched
    pub fn age(&self) -> Duration {
        Utc::now() - self.fetched_at
    }
}

/// Per-origin robots.txt cache, keyed by `scheme://host[:port]`
#[derive(Debug, Default)]
pub struct RobotsCache {
    entries: HashMap<String, CachedRobots>,
}

impl RobotsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks `target` against its own origin's robots.txt
    ///
    /// The rules are fetched from `source` the first time an origin is seen
    /// (or once its entry is stale) and reused afterwards. URLs without a host
    /// are permitted.
    pub async fn is_allowed(&mut self, source: &dyn RobotsSource, target: &Url) -> bool {
        let Some(origin) = origin_key(target) else {
            return true;
        };

        let needs_fetch = self.entries.get(&origin).map_or(true, CachedRobots::is_stale);

        if needs_fetch {
            tracing::debug!("Fetching robots.txt for {}", origin);
            let rules = match source.fetch_robots(&origin).await {
                Some(content) => RobotsRules::from_content(content),
                None => RobotsRules::absent(),
            };
            self.entries.insert(origin.clone(), CachedRobots::new(rules));
        }

        self.entries
            .get(&origin)
            .map_or(true, |cached| cached.rules.is_allowed(target.as_str()))
    }

    /// Returns the cached entry for an origin key
    pub fn get(&self, origin: &str) -> Option<&CachedRobots> {
        self.entries.get(origin)
    }

    pub fn insert(&mut self, origin: impl Into<String>, rules: RobotsRules) {
        self.entries.insert(origin.into(), CachedRobots::new(rules));
    }

    /// Number of origins with cached rules
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Serves canned robots.txt bodies and records which origins were asked for
    struct CannedRobots {
        bodies: HashMap<String, String>,
        requests: Mutex<Vec<String>>,
    }

    impl CannedRobots {
        fn new(bodies: &[(&str, &str)]) -> Self {
            Self {
                bodies: bodies
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RobotsSource for CannedRobots {
        async fn fetch_robots(&self, origin: &str) -> Option<String> {
            self.requests.lock().unwrap().push(origin.to_string());
            self.bodies.get(origin).cloned()
        }
    }

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_new_cache_not_stale() {
        let cache = CachedRobots::new(RobotsRules::absent());
        assert!(!cache.is_stale());
    }

    #[test]
    fn test_cache_is_stale() {
        let mut cache = CachedRobots::new(RobotsRules::absent());
        cache.fetched_at = Utc::now() - Duration::hours(25);
        assert!(cache.is_stale());
    }

    #[test]
    fn test_cache_not_stale_at_23_hours() {
        let mut cache = CachedRobots::new(RobotsRules::absent());
        cache.fetched_at = Utc::now() - Duration::hours(23);
        assert!(!cache.is_stale());
    }

    #[tokio::test]
    async fn test_rules_checked_against_target_origin() {
        let source = CannedRobots::new(&[
            ("https://blocked.test", "User-agent: *\nDisallow: /"),
            ("https://open.test", "User-agent: *\nAllow: /"),
        ]);
        let mut cache = RobotsCache::new();

        assert!(!cache.is_allowed(&source, &url("https://blocked.test/page")).await);
        assert!(cache.is_allowed(&source, &url("https://open.test/page")).await);
    }

    #[tokio::test]
    async fn test_rules_fetched_once_per_origin() {
        let source = CannedRobots::new(&[("https://a.test", "User-agent: *\nDisallow: /x")]);
        let mut cache = RobotsCache::new();

        assert!(!cache.is_allowed(&source, &url("https://a.test/x/1")).await);
        assert!(cache.is_allowed(&source, &url("https://a.test/y")).await);
        assert!(!cache.is_allowed(&source, &url("https://a.test/x/2")).await);

        assert_eq!(source.requests(), vec!["https://a.test".to_string()]);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_robots_fails_open() {
        let source = CannedRobots::new(&[]);
        let mut cache = RobotsCache::new();

        assert!(cache.is_allowed(&source, &url("https://missing.test/secret")).await);
        let cached = cache.get("https://missing.test").unwrap();
        assert_eq!(cached.rules, RobotsRules::Absent);
    }

    #[tokio::test]
    async fn test_stale_entry_refetched() {
        let source = CannedRobots::new(&[("https://a.test", "User-agent: *\nDisallow: /")]);
        let mut cache = RobotsCache::new();
        cache.insert("https://a.test", RobotsRules::absent());
        cache.entries.get_mut("https://a.test").unwrap().fetched_at =
            Utc::now() - Duration::hours(30);

        assert!(!cache.is_allowed(&source, &url("https://a.test/page")).await);
        assert_eq!(source.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_hostless_url_permitted_without_fetch() {
        let source = CannedRobots::new(&[]);
        let mut cache = RobotsCache::new();

        assert!(cache.is_allowed(&source, &url("mailto:x@example.com")).await);
        assert!(source.requests().is_empty());
    }
}
