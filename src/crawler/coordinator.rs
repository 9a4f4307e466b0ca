//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the traversal loop that coordinates all aspects of
//! a crawl:
//! - Managing the frontier queue and visited set
//! - Enforcing the depth and page bounds
//! - Dispatching fetches, up to the configured concurrency
//! - Normalizing content and following extracted links
//! - Stopping early on cancellation or deadline
//!
//! Traversal state lives entirely inside one invocation, so a single
//! [`Crawler`] can run any number of independent crawls at once.

use crate::config::{resolve_request, validate_crawl_config, CrawlConfig, CrawlRequest};
use crate::corpus::{Corpus, Page, SoftFailure};
use crate::crawler::fetcher::{ContentKind, FetchError, Fetched, Fetcher};
use crate::crawler::frontier::{Frontier, FrontierEntry, VisitedSet};
use crate::crawler::normalizer::{scan_links, LinkScan, Normalizer};
use crate::state::UrlState;
use crate::url::parse_seed;
use crate::{ConfigError, CrawlError};
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Bounded breadth-first crawler
///
/// With `concurrency = 1` pages are fetched one at a time and the corpus is
/// in strict BFS order (non-decreasing depth, ties in discovery order). With
/// higher concurrency, fetches are still dispatched in frontier order but
/// pages are stored in completion order.
pub struct Crawler {
    config: CrawlConfig,
    fetcher: Arc<dyn Fetcher>,
    normalizer: Normalizer,
}

impl Crawler {
    /// Creates a crawler
    ///
    /// # Arguments
    ///
    /// * `config` - Default bounds for crawls run by this crawler
    /// * `fetcher` - Network retrieval
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Configuration is valid
    /// * `Err(ConfigError)` - Configuration rejected; nothing was fetched
    pub fn new(config: CrawlConfig, fetcher: Arc<dyn Fetcher>) -> Result<Self, ConfigError> {
        validate_crawl_config(&config)?;

        Ok(Self {
            normalizer: Normalizer::new(config.anchor_policy),
            config,
            fetcher,
        })
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Crawls from `start_url`, labelling every page with `tag`
    pub async fn crawl(&self, start_url: &str, tag: &str) -> Result<Corpus, CrawlError> {
        self.crawl_until(start_url, tag, CancellationToken::new())
            .await
    }

    /// Crawls until done or until `cancel` fires
    ///
    /// Cancellation is not an error: the pages stored so far are returned
    /// and the corpus reports [`Corpus::is_cancelled`].
    pub async fn crawl_until(
        &self,
        start_url: &str,
        tag: &str,
        cancel: CancellationToken,
    ) -> Result<Corpus, CrawlError> {
        let start = parse_seed(start_url).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid start URL '{}': {}", start_url, e))
        })?;

        Ok(self.traverse(start, tag, &self.config, cancel).await)
    }

    /// Runs a caller request, whose bounds override this crawler's defaults
    pub async fn run_request(
        &self,
        request: &CrawlRequest,
        cancel: CancellationToken,
    ) -> Result<Corpus, CrawlError> {
        let (start, config) = resolve_request(request, &self.config)?;
        Ok(self.traverse(start, &request.tag, &config, cancel).await)
    }

    async fn traverse(
        &self,
        start: Url,
        tag: &str,
        config: &CrawlConfig,
        cancel: CancellationToken,
    ) -> Corpus {
        let max_pages = config.max_pages as usize;
        let concurrency = config.concurrency as usize;
        let started = Instant::now();

        let mut frontier = Frontier::new();
        let mut visited = VisitedSet::new();
        let mut corpus = Corpus::new();
        let mut in_flight = FuturesUnordered::new();

        let deadline = config
            .deadline()
            .map(|budget| tokio::time::Instant::now() + budget);
        let expired = async move {
            match deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };
        tokio::pin!(expired);

        tracing::info!(
            "Starting crawl of {} (tag: {}, max depth: {}, max pages: {}, concurrency: {})",
            start,
            tag,
            config.max_depth,
            config.max_pages,
            config.concurrency
        );

        transition(&start, UrlState::Discovered, UrlState::Queued);
        frontier.push(FrontierEntry::new(start, 0));

        loop {
            // Each dispatched fetch reserves a corpus slot, so completions can
            // never push the corpus past max_pages.
            while in_flight.len() < concurrency && corpus.len() + in_flight.len() < max_pages {
                let Some(entry) = frontier.dequeue() else {
                    break;
                };

                if entry.depth > config.max_depth {
                    transition(&entry.url, UrlState::Queued, UrlState::SkippedDepth);
                    corpus.stats_mut().skipped_depth += 1;
                    continue;
                }

                if !visited.insert(&entry.url) {
                    transition(&entry.url, UrlState::Queued, UrlState::SkippedDuplicate);
                    corpus.stats_mut().skipped_duplicate += 1;
                    continue;
                }

                tracing::debug!("Fetching {} (depth {})", entry.url, entry.depth);
                in_flight.push(self.fetch_entry(entry));
            }

            if in_flight.is_empty() {
                break;
            }

            tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    tracing::info!(
                        "Crawl cancelled with {} pages stored, abandoning {} in-flight fetches",
                        corpus.len(),
                        in_flight.len()
                    );
                    corpus.mark_cancelled();
                    break;
                }

                _ = &mut expired => {
                    tracing::info!(
                        "Crawl deadline reached with {} pages stored, abandoning {} in-flight fetches",
                        corpus.len(),
                        in_flight.len()
                    );
                    corpus.mark_cancelled();
                    break;
                }

                Some((entry, result)) = in_flight.next() => {
                    self.store(entry, result, tag, &mut frontier, &mut corpus);

                    if corpus.len() % 10 == 0 {
                        tracing::info!(
                            "Progress: {} pages stored, {} in frontier",
                            corpus.len(),
                            frontier.len()
                        );
                    }
                }
            }
        }

        tracing::info!(
            "Crawl finished: {} pages ({} soft failures) in {:?}",
            corpus.len(),
            corpus.failures().len(),
            started.elapsed()
        );

        corpus
    }

    async fn fetch_entry(
        &self,
        entry: FrontierEntry,
    ) -> (FrontierEntry, Result<Fetched, FetchError>) {
        let result = self.fetcher.fetch(&entry.url).await;
        (entry, result)
    }

    /// Normalizes one fetch result into the corpus and grows the frontier
    ///
    /// A failed fetch still produces a page, with empty content.
    fn store(
        &self,
        entry: FrontierEntry,
        result: Result<Fetched, FetchError>,
        tag: &str,
        frontier: &mut Frontier,
        corpus: &mut Corpus,
    ) {
        transition(&entry.url, UrlState::Queued, UrlState::Fetched);
        corpus.stats_mut().fetched += 1;

        let (content, scan) = match result {
            Ok(Fetched {
                content,
                kind: ContentKind::Markup,
            }) => (
                self.normalizer.to_text(&content),
                scan_links(&content, &entry.url),
            ),
            Ok(Fetched {
                content,
                kind: ContentKind::Document,
            }) => (content.trim().to_string(), LinkScan::default()),
            Err(error) => {
                tracing::warn!("Failed to fetch {}: {}", entry.url, error);
                corpus.record_failure(SoftFailure {
                    url: entry.url.to_string(),
                    depth: entry.depth,
                    error,
                });
                (String::new(), LinkScan::default())
            }
        };

        let stats = corpus.stats_mut();
        stats.links_enqueued += scan.links.len() as u64;
        stats.links_discarded += scan.discarded as u64;

        transition(&entry.url, UrlState::Fetched, UrlState::Stored);
        corpus.push(Page::new(entry.url.as_str(), content, tag));

        let depth = entry.depth + 1;
        frontier.enqueue(scan.links.into_iter().map(|url| {
            transition(&url, UrlState::Discovered, UrlState::Queued);
            FrontierEntry::new(url, depth)
        }));
    }
}

fn transition(url: &Url, from: UrlState, to: UrlState) {
    debug_assert!(from.can_transition_to(to), "{} -> {}", from, to);
    tracing::trace!("{}: {} -> {}", url, from, to);
}
