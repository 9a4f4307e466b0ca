use crate::config::types::{Config, CrawlConfig, CrawlRequest, PdfConfig, UserAgentConfig};
use crate::url::parse_seed;
use crate::ConfigError;
use url::Url;

/// Upper bound on in-flight fetches
pub const MAX_CONCURRENCY: u32 = 64;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_pdf_config(&config.pdf)?;
    Ok(())
}

/// Validates crawl bounds and tuning
pub fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.concurrency < 1 || config.concurrency > MAX_CONCURRENCY {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and {}, got {}",
            MAX_CONCURRENCY, config.concurrency
        )));
    }

    if config.request_timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout must be >= 1s, got {}s",
            config.request_timeout
        )));
    }

    if config.deadline == Some(0) {
        return Err(ConfigError::Validation(
            "deadline must be >= 1s when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
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

    if let Some(contact) = &config.contact_url {
        Url::parse(contact)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;
    }

    Ok(())
}

/// Validates the PDF collaborator endpoint, if any
fn validate_pdf_config(config: &PdfConfig) -> Result<(), ConfigError> {
    if let Some(endpoint) = &config.endpoint {
        let url = Url::parse(endpoint)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid pdf endpoint: {}", e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "PDF endpoint '{}' must use HTTP or HTTPS",
                endpoint
            )));
        }
    }

    Ok(())
}

/// Converts a request bound into a `u32`, rejecting negative values
fn bound(name: &str, value: i64) -> Result<u32, ConfigError> {
    u32::try_from(value).map_err(|_| {
        ConfigError::Validation(format!("{} must be between 0 and {}, got {}", name, u32::MAX, value))
    })
}

/// Applies a crawl request on top of a base configuration
///
/// Bounds missing from the request keep the base values. The merged
/// configuration and the start URL are validated before anything is fetched.
///
/// # Returns
///
/// * `Ok((Url, CrawlConfig))` - Parsed start URL and effective configuration
/// * `Err(ConfigError)` - The request cannot start
pub fn resolve_request(
    request: &CrawlRequest,
    base: &CrawlConfig,
) -> Result<(Url, CrawlConfig), ConfigError> {
    let mut config = base.clone();

    if let Some(depth) = request.max_depth {
        config.max_depth = bound("max_depth", depth)?;
    }

    if let Some(pages) = request.max_pages {
        config.max_pages = bound("max_pages", pages)?;
    }

    validate_crawl_config(&config)?;

    let start = parse_seed(&request.start_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid start URL '{}': {}", request.start_url, e))
    })?;

    Ok((start, config))
}
