//! URL handling module for Babel-Ripple
//!
//! This module provides link canonicalization, base URL resolution and
//! host/origin extraction. Everything here is infallible: malformed input
//! degrades to a best-effort string instead of an error.

mod base;
mod domain;
mod normalize;

pub use base::resolve_base;
pub use domain::{extract_domain, origin_key};
pub use normalize::normalize;

/// Returns true for URLs the crawler can actually fetch
pub fn is_crawlable(url: &::url::Url) -> bool {
    matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::url::Url;

    #[test]
    fn test_is_crawlable() {
        assert!(is_crawlable(&Url::parse("https://example.com/").unwrap()));
        assert!(is_crawlable(&Url::parse("http://example.com/a?b=c").unwrap()));
        assert!(!is_crawlable(&Url::parse("mailto:someone@example.com").unwrap()));
        assert!(!is_crawlable(&Url::parse("javascript:void(0)").unwrap()));
        assert!(!is_crawlable(&Url::parse("ftp://example.com/file").unwrap()));
    }
}
