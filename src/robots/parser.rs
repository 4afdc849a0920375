//! Robots.txt rule evaluation
//!
//! This module wraps the robotstxt crate's matcher behind a fail-open type:
//! missing rules, unparseable rules and matcher failures all permit the fetch.

use robotstxt::DefaultMatcher;

/// User agent the rules are evaluated for
pub const WILDCARD_AGENT: &str = "*";

/// A site's robots.txt, or the knowledge that it has none
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RobotsRules {
    /// robots.txt could not be fetched; everything is permitted
    Absent,
    /// Raw robots.txt body
    Present(String),
}

impl RobotsRules {
    /// Wraps a fetched robots.txt body
    pub fn from_content(content: impl Into<String>) -> Self {
        Self::Present(content.into())
    }

    /// Rules for a site without a reachable robots.txt
    pub fn absent() -> Self {
        Self::Absent
    }

    /// Returns true if there is a robots.txt body to evaluate
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Checks whether `url` may be fetched by a wildcard user agent
    ///
    /// # Arguments
    ///
    /// * `url` - The absolute URL to check
    ///
    /// # Returns
    ///
    /// * `true` - If the URL is allowed, or the rules are absent or unusable
    /// * `false` - If a matching `Disallow` applies
    pub fn is_allowed(&self, url: &str) -> bool {
        let content = match self {
            Self::Absent => return true,
            Self::Present(content) if content.trim().is_empty() => return true,
            Self::Present(content) => content,
        };

        // robotstxt can panic on some malformed multi-byte input
        std::panic::catch_unwind(|| {
            let mut matcher = DefaultMatcher::default();
            matcher.one_agent_allowed_by_robots(content, WILDCARD_AGENT, url)
        })
        .unwrap_or_else(|_| {
            tracing::warn!("robots.txt matcher failed for {}, permitting fetch", url);
            true
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_allows_everything() {
        let robots = RobotsRules::absent();
        assert!(robots.is_allowed("https://example.com/any/path"));
        assert!(robots.is_allowed("https://example.com/admin"));
        assert!(robots.is_allowed("not even a url"));
    }

    #[test]
    fn test_parse_disallow_all() {
        let robots = RobotsRules::from_content("User-agent: *\nDisallow: /");
        assert!(!robots.is_allowed("https://example.com/"));
        assert!(!robots.is_allowed("https://example.com/page"));
    }

    #[test]
    fn test_parse_disallow_specific() {
        let robots = RobotsRules::from_content("User-agent: *\nDisallow: /admin");
        assert!(robots.is_allowed("https://example.com/"));
        assert!(robots.is_allowed("https://example.com/page"));
        assert!(!robots.is_allowed("https://example.com/admin"));
        assert!(!robots.is_allowed("https://example.com/admin/users"));
    }

    #[test]
    fn test_parse_allow_and_disallow() {
        let robots =
            RobotsRules::from_content("User-agent: *\nDisallow: /private\nAllow: /private/public");
        assert!(robots.is_allowed("https://example.com/"));
        assert!(!robots.is_allowed("https://example.com/private"));
        assert!(robots.is_allowed("https://example.com/private/public"));
    }

    #[test]
    fn test_named_agent_group_does_not_apply_to_wildcard() {
        let robots = RobotsRules::from_content("User-agent: BadBot\nDisallow: /\n\nUser-agent: *\nAllow: /");
        assert!(robots.is_allowed("https://example.com/page"));
    }

    #[test]
    fn test_invalid_robots_txt() {
        let robots = RobotsRules::from_content("This is not valid robots.txt {{{");
        assert!(robots.is_allowed("https://example.com/any/path"));
    }

    #[test]
    fn test_empty_robots_txt() {
        let robots = RobotsRules::from_content("   \n");
        assert!(robots.is_present());
        assert!(robots.is_allowed("https://example.com/any/path"));
    }
}
