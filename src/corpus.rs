//! Crawl results
//!
//! A [`Corpus`] is the ordered, append-only collection of pages produced by a
//! single crawl invocation, together with the soft failures and counters
//! gathered along the way.

use crate::crawler::FetchError;
use serde::Serialize;

/// The normalized text of one processed document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    /// URL the page was fetched from
    pub url: String,

    /// Normalized text (empty when the fetch soft-failed)
    pub content: String,

    /// Caller-supplied grouping label (e.g. a source or company identifier)
    pub tag: String,
}

impl Page {
    pub fn new(url: impl Into<String>, content: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content: content.into(),
            tag: tag.into(),
        }
    }
}

/// A URL whose fetch failed but whose failure did not abort the crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftFailure {
    /// The URL that failed
    pub url: String,

    /// Frontier depth of the URL
    pub depth: u32,

    /// What went wrong
    pub error: FetchError,
}

/// Counters collected during a crawl
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlStats {
    /// Fetches attempted (each URL at most once)
    pub fetched: u64,

    /// Fetches that soft-failed
    pub failed: u64,

    /// Entries dequeued beyond the maximum depth
    pub skipped_depth: u64,

    /// Entries dequeued for an already-fetched URL
    pub skipped_duplicate: u64,

    /// Links resolved and pushed onto the frontier
    pub links_enqueued: u64,

    /// Links discarded because they could not be resolved
    pub links_discarded: u64,
}

/// Ordered result of one crawl invocation
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pages: Vec<Page>,
    failures: Vec<SoftFailure>,
    stats: CrawlStats,
    cancelled: bool,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a page; pages are never removed or reordered
    pub fn push(&mut self, page: Page) {
        self.pages.push(page);
    }

    pub(crate) fn record_failure(&mut self, failure: SoftFailure) {
        self.stats.failed += 1;
        self.failures.push(failure);
    }

    pub(crate) fn stats_mut(&mut self) -> &mut CrawlStats {
        &mut self.stats
    }

    pub(crate) fn mark_cancelled(&mut self) {
        self.cancelled = true;
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn failures(&self) -> &[SoftFailure] {
        &self.failures
    }

    pub fn stats(&self) -> &CrawlStats {
        &self.stats
    }

    /// True if the crawl stopped early on cancellation or deadline
    ///
    /// A cancelled corpus is still a valid partial result.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// URLs of the stored pages, in corpus order
    pub fn urls(&self) -> Vec<&str> {
        self.pages.iter().map(|p| p.url.as_str()).collect()
    }

    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }
}

impl IntoIterator for Corpus {
    type Item = Page;
    type IntoIter = std::vec::IntoIter<Page>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_order() {
        let mut corpus = Corpus::new();
        corpus.push(Page::new("https://x.com/", "home", "acme"));
        corpus.push(Page::new("https://x.com/about", "about", "acme"));

        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.urls(), vec!["https://x.com/", "https://x.com/about"]);
    }

    #[test]
    fn test_into_pages_hands_over_in_order() {
        let mut corpus = Corpus::new();
        corpus.push(Page::new("https://x.com/", "home", "acme"));
        corpus.push(Page::new("https://x.com/jobs", "jobs", "acme"));

        let pages = corpus.into_pages();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].url, "https://x.com/jobs");
        assert_eq!(pages[1].content, "jobs");
    }

    #[test]
    fn test_record_failure_counts() {
        let mut corpus = Corpus::new();
        corpus.record_failure(SoftFailure {
            url: "https://x.com/down".to_string(),
            depth: 1,
            error: FetchError::Status(503),
        });

        assert_eq!(corpus.stats().failed, 1);
        assert_eq!(corpus.failures()[0].url, "https://x.com/down");
        assert!(corpus.is_empty());
    }

    #[test]
    fn test_page_serializes_downstream_fields() {
        let page = Page::new("https://x.com/", "hello", "acme");
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["url"], "https://x.com/");
        assert_eq!(json["content"], "hello");
        assert_eq!(json["tag"], "acme");
    }
}
