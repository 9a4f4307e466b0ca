use crate::crawler::AnchorPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Depth bound used when a request does not specify one
pub const DEFAULT_MAX_DEPTH: u32 = 2;

/// Page bound used when a request does not specify one
pub const DEFAULT_MAX_PAGES: u32 = 1;

/// Main configuration structure, as loaded from a TOML file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub pdf: PdfConfig,
}

/// Bounds and tuning for one crawl invocation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Maximum link-hops from the start URL
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Maximum number of pages in the corpus (at least 1)
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Number of fetches allowed in flight at once; 1 gives strict BFS order
    pub concurrency: u32,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,

    /// Optional wall-clock budget for the whole crawl (seconds)
    pub deadline: Option<u64>,

    /// How anchor elements are rendered in normalized text
    #[serde(rename = "anchor-policy")]
    pub anchor_policy: AnchorPolicy,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_pages: DEFAULT_MAX_PAGES,
            concurrency: 1,
            request_timeout: 30,
            deadline: None,
            anchor_policy: AnchorPolicy::default(),
        }
    }
}

impl CrawlConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline.map(Duration::from_secs)
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url", default)]
    pub contact_url: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "seedcrawl".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    ///
    /// Format: `CrawlerName/Version` or `CrawlerName/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

/// PDF extraction collaborator configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PdfConfig {
    /// Endpoint accepting a raw PDF body and answering `{"text": "..."}`
    ///
    /// When unset, PDF documents soft-fail to empty content.
    pub endpoint: Option<String>,
}

/// A crawl invocation as received from a caller
///
/// Bounds are signed so that out-of-range input can be reported as a
/// configuration error instead of failing to deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CrawlRequest {
    #[serde(rename = "startUrl", alias = "start_url")]
    pub start_url: String,
    pub tag: String,
    #[serde(rename = "maxDepth", alias = "max_depth", default)]
    pub max_depth: Option<i64>,
    #[serde(rename = "maxPages", alias = "max_pages", default)]
    pub max_pages: Option<i64>,
}

impl CrawlRequest {
    pub fn new(start_url: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            start_url: start_url.into(),
            tag: tag.into(),
            max_depth: None,
            max_pages: None,
        }
    }

    pub fn with_max_depth(mut self, max_depth: i64) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_max_pages(mut self, max_pages: i64) -> Self {
        self.max_pages = Some(max_pages);
        self
    }
}
