//! Babel-Ripple main entry point
//!
//! This is the command-line interface for the Babel-Ripple language-sampling crawler.

use anyhow::{bail, Context};
use babel_ripple::config::{load_config_with_hash, Config, LoggingConfig};
use babel_ripple::crawler::run_crawl;
use babel_ripple::output::print_summary;
use clap::Parser;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Babel-Ripple: a language-sampling web crawler
///
/// Babel-Ripple starts from the results of a search query, explores outward
/// favouring domains it has not seen yet, respects robots.txt, and estimates
/// which share of the pages it visits are Chinese, Spanish or Polish.
#[derive(Parser, Debug)]
#[command(name = "babel-ripple")]
#[command(version)]
#[command(about = "A language-sampling web crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Search query for seed URLs (prompted for when omitted)
    #[arg(long, value_name = "TEXT")]
    query: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error console output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show the effective settings without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, config_hash) = match &cli.config {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    setup_logging(cli.verbose, cli.quiet, &config.logging)?;

    match (&cli.config, &config_hash) {
        (Some(path), Some(hash)) => {
            tracing::info!("Configuration loaded from {} (hash: {})", path.display(), hash)
        }
        _ => tracing::info!("No configuration file given, using defaults"),
    }

    let query = if config.seeds.urls.is_empty() {
        match cli.query {
            Some(query) => query,
            None => prompt_query()?,
        }
    } else {
        tracing::info!("Using {} static seed URLs", config.seeds.urls.len());
        cli.query.unwrap_or_default()
    };

    if config.seeds.urls.is_empty() && query.trim().is_empty() {
        bail!("A search query is required when no static seed URLs are configured");
    }

    let start = Instant::now();
    let stats = run_crawl(&config, &query).await.context("Crawl failed")?;
    print_summary(&stats, start.elapsed());

    Ok(())
}

/// Sets up console, run-log and error-log output
///
/// The console level follows `-v`/`-q` unless `RUST_LOG` is set. The run log
/// receives INFO and above, the error log WARN and above.
fn setup_logging(verbose: u8, quiet: bool, logging: &LoggingConfig) -> anyhow::Result<()> {
    let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if quiet {
            EnvFilter::new("error")
        } else {
            match verbose {
                0 => EnvFilter::new("babel_ripple=info,warn"),
                1 => EnvFilter::new("babel_ripple=debug,info"),
                2 => EnvFilter::new("babel_ripple=trace,debug"),
                _ => EnvFilter::new("trace"),
            }
        }
    });

    let run_log = open_log(&logging.run_log)?;
    let error_log = open_log(&logging.error_log)?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_filter(console_filter),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(run_log))
                .with_filter(EnvFilter::new("babel_ripple=info,warn")),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(error_log))
                .with_filter(LevelFilter::WARN),
        )
        .init();

    Ok(())
}

fn open_log(path: &str) -> anyhow::Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path))
}

/// Reads the seed query from stdin
fn prompt_query() -> anyhow::Result<String> {
    print!("Enter search query: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read search query")?;

    Ok(line.trim().to_string())
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Babel-Ripple Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Budget: {} pages", config.crawler.budget);
    println!("  Max links per page: {}", config.crawler.max_links);
    println!("  Sample rate: {:.4}", config.crawler.sample_rate);
    println!("  Request delay: {}ms", config.crawler.request_delay_ms);
    println!("  Request timeout: {}ms", config.crawler.request_timeout_ms);
    match config.crawler.rng_seed {
        Some(seed) => println!("  RNG seed: {}", seed),
        None => println!("  RNG seed: random"),
    }

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nSeeds:");
    if config.seeds.urls.is_empty() {
        println!("  Search: {}", config.seeds.search_url);
        println!("  Results used: {}", config.seeds.count);
    } else {
        println!("  Static seeds ({}):", config.seeds.urls.len());
        for url in &config.seeds.urls {
            println!("    * {}", url);
        }
    }

    println!("\nLogging:");
    println!("  Run log: {}", config.logging.run_log);
    println!("  Error log: {}", config.logging.error_log);

    println!("\n✓ Configuration is valid");
}
