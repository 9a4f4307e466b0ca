//! Output module for exporting crawl corpora
//!
//! This module handles:
//! - JSON export for indexing pipelines
//! - Markdown export for human review
//! - SQLite export for accumulating several crawls

mod json;
mod markdown;
mod schema;
mod sqlite_output;
mod traits;

pub use json::JsonWriter;
pub use markdown::{format_markdown, MarkdownWriter};
pub use sqlite_output::SqliteWriter;
pub use traits::{CorpusWriter, CrawlRun, OutputError, OutputResult};

use crate::corpus::Corpus;
use clap::ValueEnum;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Sqlite,
}

/// Writes a corpus in the given format
///
/// JSON and markdown go to `path` when given, stdout otherwise. SQLite
/// always needs a path.
///
/// # Returns
///
/// * `Ok(())` - Corpus written
/// * `Err(OutputError)` - Failed to write
pub fn write_corpus(
    format: OutputFormat,
    path: Option<&Path>,
    run: &CrawlRun,
    corpus: &Corpus,
) -> OutputResult<()> {
    match (format, path) {
        (OutputFormat::Sqlite, Some(path)) => SqliteWriter::new(path)?.write_corpus(run, corpus),
        (OutputFormat::Sqlite, None) => Err(OutputError::Format(
            "SQLite output requires an output path".to_string(),
        )),
        (OutputFormat::Json, Some(path)) => {
            JsonWriter::new(BufWriter::new(File::create(path)?)).write_corpus(run, corpus)
        }
        (OutputFormat::Json, None) => JsonWriter::new(io::stdout().lock()).write_corpus(run, corpus),
        (OutputFormat::Markdown, Some(path)) => {
            MarkdownWriter::new(BufWriter::new(File::create(path)?)).write_corpus(run, corpus)
        }
        (OutputFormat::Markdown, None) => {
            MarkdownWriter::new(io::stdout().lock()).write_corpus(run, corpus)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Page;
    use chrono::Utc;
    use tempfile::tempdir;

    fn sample() -> (CrawlRun, Corpus) {
        let mut corpus = Corpus::new();
        corpus.push(Page::new("https://x.com/", "Home", "acme"));
        let run = CrawlRun::finished("https://x.com/", "acme", Utc::now(), "hash", &corpus);
        (run, corpus)
    }

    #[test]
    fn test_sqlite_requires_path() {
        let (run, corpus) = sample();
        let result = write_corpus(OutputFormat::Sqlite, None, &run, &corpus);
        assert!(matches!(result, Err(OutputError::Format(_))));
    }

    #[test]
    fn test_write_each_format_to_file() {
        let dir = tempdir().unwrap();
        let (run, corpus) = sample();

        for (format, name) in [
            (OutputFormat::Json, "corpus.json"),
            (OutputFormat::Markdown, "corpus.md"),
            (OutputFormat::Sqlite, "corpus.db"),
        ] {
            let path = dir.path().join(name);
            write_corpus(format, Some(&path), &run, &corpus).unwrap();
            assert!(path.exists(), "{} was not written", name);
        }

        let json = std::fs::read_to_string(dir.path().join("corpus.json")).unwrap();
        assert!(json.contains("\"tag\": \"acme\""));
    }
}
