use crate::config::types::{Config, CrawlerConfig, LoggingConfig, SeedsConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_seeds_config(&config.seeds)?;
    validate_logging_config(&config.logging)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.budget < 1 {
        return Err(ConfigError::Validation(format!(
            "budget must be >= 1, got {}",
            config.budget
        )));
    }

    if config.max_links < 1 || config.max_links > 10_000 {
        return Err(ConfigError::Validation(format!(
            "max_links must be between 1 and 10000, got {}",
            config.max_links
        )));
    }

    if !(0.0..=1.0).contains(&config.sample_rate) {
        return Err(ConfigError::Validation(format!(
            "sample_rate must be between 0 and 1, got {}",
            config.sample_rate
        )));
    }

    if config.request_timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_ms must be >= 100ms, got {}ms",
            config.request_timeout_ms
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates seed sources
fn validate_seeds_config(config: &SeedsConfig) -> Result<(), ConfigError> {
    if config.count < 1 {
        return Err(ConfigError::Validation(
            "seeds.count must be >= 1".to_string(),
        ));
    }

    if !config.search_url.contains("{query}") {
        return Err(ConfigError::Validation(format!(
            "search_url must contain a {{query}} placeholder, got '{}'",
            config.search_url
        )));
    }

    Url::parse(&config.search_url.replace("{query}", "probe"))
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid search_url: {}", e)))?;

    for seed in &config.urls {
        let url = Url::parse(seed).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::Validation(format!(
                "Seed URL '{}' must use HTTP or HTTPS",
                seed
            )));
        }
    }

    Ok(())
}

fn validate_logging_config(config: &LoggingConfig) -> Result<(), ConfigError> {
    if config.run_log.is_empty() || config.error_log.is_empty() {
        return Err(ConfigError::Validation(
            "log file paths cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
