use serde::Deserialize;

/// Main configuration structure for Babel-Ripple
///
/// Every section is optional; a missing file or section falls back to the
/// defaults documented on each field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub seeds: SeedsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Maximum number of successfully crawled pages before the run stops
    #[serde(default = "default_budget")]
    pub budget: u64,

    /// Links kept per page; also the least urgent priority value
    #[serde(default = "default_max_links")]
    pub max_links: u32,

    /// Probability that a crawled page is sampled for language detection
    #[serde(default = "default_sample_rate")]
    pub sample_rate: f64,

    /// Fixed delay before every page request (milliseconds)
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Per-request timeout (milliseconds)
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Seed for the crawl's random number generator (random when unset)
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(default = "default_crawler_version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(default = "default_contact_url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(default = "default_contact_email")]
    pub contact_email: String,
}

/// Where the initial frontier comes from
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SeedsConfig {
    /// Number of search results used as seeds
    #[serde(default = "default_seed_count")]
    pub count: usize,

    /// Search results page; `{query}` is replaced by the encoded query
    #[serde(default = "default_search_url")]
    pub search_url: String,

    /// Fixed seed URLs; when non-empty the search step is skipped
    #[serde(default)]
    pub urls: Vec<String>,
}

/// Log file destinations
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LoggingConfig {
    /// Run log (INFO and above)
    #[serde(default = "default_run_log")]
    pub run_log: String,

    /// Warning/error log
    #[serde(default = "default_error_log")]
    pub error_log: String,
}

fn default_budget() -> u64 {
    10_000
}

fn default_max_links() -> u32 {
    50
}

fn default_sample_rate() -> f64 {
    1.0 / 3.0
}

fn default_request_delay_ms() -> u64 {
    10
}

fn default_request_timeout_ms() -> u64 {
    2_500
}

fn default_crawler_name() -> String {
    "BabelRipple".to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_contact_url() -> String {
    "https://example.com/babel-ripple".to_string()
}

fn default_contact_email() -> String {
    "crawler@example.com".to_string()
}

fn default_seed_count() -> usize {
    10
}

fn default_search_url() -> String {
    "https://html.duckduckgo.com/html/?q={query}".to_string()
}

fn default_run_log() -> String {
    "babel-ripple.log".to_string()
}

fn default_error_log() -> String {
    "babel-ripple-error.log".to_string()
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            budget: default_budget(),
            max_links: default_max_links(),
            sample_rate: default_sample_rate(),
            request_delay_ms: default_request_delay_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            rng_seed: None,
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
            contact_url: default_contact_url(),
            contact_email: default_contact_email(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header: `Name/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

impl Default for SeedsConfig {
    fn default() -> Self {
        Self {
            count: default_seed_count(),
            search_url: default_search_url(),
            urls: Vec::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            run_log: default_run_log(),
            error_log: default_error_log(),
        }
    }
}
