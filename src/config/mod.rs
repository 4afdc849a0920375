//! Configuration module for Babel-Ripple
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so running without a file is equivalent to an empty one.
//!
//! # Example
//!
//! ```no_run
//! use babel_ripple::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("babel-ripple.toml")).unwrap();
//! println!("Crawl budget: {}", config.crawler.budget);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{Config, CrawlerConfig, LoggingConfig, SeedsConfig, UserAgentConfig};

pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
