//! Crawler module for page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - The FIFO frontier and the visited set
//! - HTTP fetching with content-type branching and PDF extraction
//! - Markup normalization and link extraction
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod normalizer;
mod pdf;

pub use coordinator::Crawler;
pub use fetcher::{build_http_client, ContentKind, FetchError, Fetched, Fetcher, HttpFetcher};
pub use frontier::{Frontier, FrontierEntry, VisitedSet};
pub use normalizer::{scan_links, AnchorPolicy, LinkScan, Normalizer};
pub use pdf::{DisabledPdfExtractor, ExtractionError, HttpPdfExtractor, PdfExtractor};

use crate::config::Config;
use crate::corpus::Corpus;
use crate::CrawlError;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Runs a complete crawl over HTTP
///
/// This is the main entry point for a crawl driven by configuration. It will:
/// 1. Build the HTTP client and PDF extractor
/// 2. Validate the crawl bounds
/// 3. Traverse from `start_url` until a bound is hit, the frontier is
///    exhausted, or `cancel` fires
///
/// # Arguments
///
/// * `config` - The loaded configuration
/// * `start_url` - Seed URL
/// * `tag` - Label attached to every page
/// * `cancel` - Token that stops the crawl early
///
/// # Returns
///
/// * `Ok(Corpus)` - Crawl finished (possibly partially, if cancelled)
/// * `Err(CrawlError)` - Crawl could not start
pub async fn crawl(
    config: &Config,
    start_url: &str,
    tag: &str,
    cancel: CancellationToken,
) -> Result<Corpus, CrawlError> {
    let fetcher = HttpFetcher::from_config(config)?;
    let crawler = Crawler::new(config.crawler.clone(), Arc::new(fetcher))?;
    crawler.crawl_until(start_url, tag, cancel).await
}
