//! Robots.txt handling module
//!
//! This module provides functionality for fetching, evaluating, and caching
//! robots.txt files. The gate fails open: an unreachable or unusable
//! robots.txt never blocks a fetch.

mod cache;
mod parser;

pub use cache::{CachedRobots, RobotsCache};
pub use parser::{RobotsRules, WILDCARD_AGENT};

use crate::config::UserAgentConfig;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Source of raw robots.txt bodies
#[async_trait]
pub trait RobotsSource: Send + Sync {
    /// Fetches `{origin}/robots.txt`
    ///
    /// # Returns
    ///
    /// * `Some(String)` - The body of a 200 response
    /// * `None` - Any network error or non-200 status
    async fn fetch_robots(&self, origin: &str) -> Option<String>;
}

/// Fetches robots.txt over HTTP with relaxed certificate validation
pub struct HttpRobotsSource {
    client: Client,
}

impl HttpRobotsSource {
    /// Builds a robots.txt client
    ///
    /// # Arguments
    ///
    /// * `user_agent` - The user agent configuration
    /// * `timeout` - Per-request timeout
    pub fn new(user_agent: &UserAgentConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent.header_value())
            .timeout(timeout)
            .danger_accept_invalid_certs(true)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl RobotsSource for HttpRobotsSource {
    async fn fetch_robots(&self, origin: &str) -> Option<String> {
        let robots_url = format!("{}/robots.txt", origin.trim_end_matches('/'));

        let response = match self.client.get(&robots_url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("robots.txt unavailable at {}: {}", robots_url, e);
                return None;
            }
        };

        if response.status() != StatusCode::OK {
            tracing::debug!(
                "robots.txt at {} returned HTTP {}",
                robots_url,
                response.status().as_u16()
            );
            return None;
        }

        match response.text().await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::debug!("Failed to read robots.txt body from {}: {}", robots_url, e);
                None
            }
        }
    }
}

/// Checks if a URL is allowed by robots.txt rules
///
/// Absent rules always permit.
pub fn is_allowed(url: &str, rules: &RobotsRules) -> bool {
    rules.is_allowed(url)
}
