//! Frontier queue and visited set
//!
//! The frontier is a plain FIFO with no deduplication: the same URL may be
//! enqueued many times. The visited set is the only dedup mechanism, and it
//! is consulted after dequeue, immediately before a fetch.

use std::collections::{HashSet, VecDeque};
use url::Url;

/// A URL waiting to be processed, with its link distance from the start URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// The URL to fetch
    pub url: Url,

    /// Number of link-hops from the start URL
    pub depth: u32,
}

impl FrontierEntry {
    pub fn new(url: Url, depth: u32) -> Self {
        Self { url, depth }
    }
}

/// Insertion-ordered work list of frontier entries
///
/// Strict FIFO: every depth-`d` entry is dequeued before any depth-`d+1`
/// entry discovered from it, which yields breadth-first traversal.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single entry at the back of the queue
    pub fn push(&mut self, entry: FrontierEntry) {
        self.queue.push_back(entry);
    }

    /// Adds entries at the back of the queue, preserving their order
    pub fn enqueue<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = FrontierEntry>,
    {
        self.queue.extend(entries);
    }

    /// Removes and returns the oldest entry
    pub fn dequeue(&mut self) -> Option<FrontierEntry> {
        self.queue.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

/// URLs already fetched within one crawl invocation
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, url: &Url) -> bool {
        self.urls.contains(url.as_str())
    }

    /// Test-and-set: marks the URL visited, returning true if it was new
    pub fn insert(&mut self, url: &Url) -> bool {
        self.urls.insert(url.as_str().to_string())
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
