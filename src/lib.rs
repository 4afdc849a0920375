//! Babel-Ripple: a language-sampling focused crawler
//!
//! This crate implements a web crawler that explores outward from search seeds
//! through a priority-ordered frontier, favouring unexplored domains, respecting
//! robots.txt, and sampling visited pages to estimate their language mix.

pub mod config;
pub mod crawler;
pub mod language;
pub mod output;
pub mod robots;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Babel-Ripple operations
#[derive(Debug, Error)]
pub enum BabelError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Seed acquisition failed: {0}")]
    Seeds(#[from] SeedError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while fetching a page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} failed: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("Expected HTML from {url}, got {content_type}")]
    NotHtml { url: String, content_type: String },

    #[error("Fetch failed for {url}: {message}")]
    Other { url: String, message: String },
}

/// Errors raised while turning a fetched body into a document
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Document is empty")]
    EmptyDocument,

    #[error("Body looks binary, not HTML")]
    Binary,
}

/// Errors raised by a seed provider
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Search request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Search returned HTTP {status}")]
    Status { status: u16 },

    #[error("Invalid search URL: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Babel-Ripple operations
pub type Result<T> = std::result::Result<T, BabelError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, CrawlPhase, StepOutcome};
pub use language::LanguageBucket;
pub use output::CrawlStats;
pub use url::{normalize, resolve_base};
