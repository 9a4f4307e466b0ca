//! Seedcrawl: a bounded breadth-first crawler for building text corpora
//!
//! Starting from a seed URL, this crate walks hyperlinked documents up to a
//! configured depth and page count, normalizes HTML and PDF content into
//! plain markdown-like text, and returns the pages as an ordered corpus.

pub mod config;
pub mod corpus;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for crawl invocations
///
/// Only configuration and setup problems surface here. Failures that affect a
/// single URL are recorded in the returned [`Corpus`] instead.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
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

/// URL-specific errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UrlError {
    #[error("Empty link")]
    Empty,

    #[error("Unsupported URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Malformed URL: {0}")]
    Malformed(String),
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::{CrawlConfig, CrawlRequest};
pub use corpus::{Corpus, CrawlStats, Page, SoftFailure};
pub use crawler::{Crawler, FetchError, Fetcher, HttpFetcher};
pub use state::UrlState;
pub use crate::url::resolve;
