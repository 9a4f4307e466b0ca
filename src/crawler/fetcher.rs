//! HTTP fetcher implementation
//!
//! This module handles all network retrieval for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests with timeout and status classification
//! - Branching on content type: markup is returned as text, PDF bytes are
//!   handed to the extraction collaborator

use crate::config::{Config, UserAgentConfig};
use crate::crawler::pdf::{DisabledPdfExtractor, ExtractionError, HttpPdfExtractor, PdfExtractor};
use crate::url::has_pdf_extension;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect::Policy, Client};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors for a single fetch
///
/// None of these abort a crawl; the orchestrator records them as soft
/// failures and stores the page with empty content.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Request timed out")]
    Timeout,

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
}

/// How fetched content should be treated downstream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// HTML or other text markup; normalized and scanned for links
    Markup,

    /// Text extracted from a binary document; stored as-is, has no links
    Document,
}

/// Successfully retrieved content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub content: String,
    pub kind: ContentKind,
}

impl Fetched {
    pub fn markup(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: ContentKind::Markup,
        }
    }

    pub fn document(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: ContentKind::Document,
        }
    }
}

/// Retrieves the content behind a URL
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Fetched, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Per-request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use seedcrawl::config::UserAgentConfig;
/// use seedcrawl::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetcher backed by `reqwest`
pub struct HttpFetcher {
    client: Client,
    pdf: Arc<dyn PdfExtractor>,
}

impl HttpFetcher {
    pub fn new(client: Client, pdf: Arc<dyn PdfExtractor>) -> Self {
        Self { client, pdf }
    }

    /// Builds a fetcher from the loaded configuration
    ///
    /// PDF extraction goes through the configured endpoint, sharing the same
    /// client; without an endpoint every PDF soft-fails.
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let client = build_http_client(&config.user_agent, config.crawler.request_timeout())?;

        let pdf: Arc<dyn PdfExtractor> = match &config.pdf.endpoint {
            Some(endpoint) => Arc::new(HttpPdfExtractor::new(client.clone(), endpoint.clone())),
            None => Arc::new(DisabledPdfExtractor),
        };

        Ok(Self::new(client, pdf))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Fetched, FetchError> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(classify_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();

        if has_pdf_extension(url) || content_type.starts_with("application/pdf") {
            let bytes = response.bytes().await.map_err(classify_error)?;
            tracing::debug!("Handing {} byte PDF from {} to extractor", bytes.len(), url);
            let text = self.pdf.extract(&bytes).await?;
            return Ok(Fetched::document(text));
        }

        let body = response.text().await.map_err(classify_error)?;
        Ok(Fetched::markup(body))
    }
}

/// Maps a transport error onto the fetch taxonomy
fn classify_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_connect() {
        FetchError::Network(format!("Connection failed: {}", e))
    } else {
        FetchError::Network(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(5));
        assert!(client.is_ok());
    }

    #[test]
    fn test_from_config_without_pdf_endpoint() {
        assert!(HttpFetcher::from_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_fetch_error_messages() {
        assert_eq!(FetchError::Status(404).to_string(), "HTTP status 404");
        assert_eq!(
            FetchError::from(ExtractionError::Unavailable).to_string(),
            "Extraction failed: No PDF extraction endpoint configured"
        );
    }

    // Network behavior is covered with wiremock in tests/fetcher_tests.rs
}
