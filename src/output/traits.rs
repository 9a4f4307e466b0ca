//! Output writer traits and types
//!
//! This module defines the trait interface for corpus writers and the run
//! metadata that accompanies an exported corpus.

use crate::corpus::Corpus;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to format output: {0}")]
    Format(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Metadata about one crawl invocation
#[derive(Debug, Clone, Serialize)]
pub struct CrawlRun {
    /// Seed URL
    pub start_url: String,

    /// Label attached to every page
    pub tag: String,

    /// When the crawl started
    pub started_at: DateTime<Utc>,

    /// When the crawl returned
    pub finished_at: DateTime<Utc>,

    /// Fingerprint of the effective configuration
    pub config_hash: String,

    /// Whether the crawl stopped early
    pub cancelled: bool,
}

impl CrawlRun {
    /// Creates run metadata for a crawl that has just returned
    pub fn finished(
        start_url: impl Into<String>,
        tag: impl Into<String>,
        started_at: DateTime<Utc>,
        config_hash: impl Into<String>,
        corpus: &Corpus,
    ) -> Self {
        Self {
            start_url: start_url.into(),
            tag: tag.into(),
            started_at,
            finished_at: Utc::now(),
            config_hash: config_hash.into(),
            cancelled: corpus.is_cancelled(),
        }
    }

    /// Duration of the run in whole seconds
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}

/// Trait for corpus writers
///
/// A writer receives the finished corpus once, together with its run
/// metadata.
pub trait CorpusWriter {
    /// Writes the corpus
    ///
    /// # Arguments
    ///
    /// * `run` - Metadata about the crawl
    /// * `corpus` - The pages, failures and counters to export
    fn write_corpus(&mut self, run: &CrawlRun, corpus: &Corpus) -> OutputResult<()>;
}
