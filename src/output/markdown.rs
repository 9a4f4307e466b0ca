//! Markdown corpus export
//!
//! This module renders a crawl as a single human-readable markdown document:
//! run information, counters, failures, then every page's text.

use crate::corpus::Corpus;
use crate::output::traits::{CorpusWriter, CrawlRun, OutputResult};
use std::io::Write;

/// Writes the corpus as markdown
pub struct MarkdownWriter<W: Write> {
    out: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> CorpusWriter for MarkdownWriter<W> {
    fn write_corpus(&mut self, run: &CrawlRun, corpus: &Corpus) -> OutputResult<()> {
        let markdown = format_markdown(run, corpus);
        self.out.write_all(markdown.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

/// Formats a crawl as markdown
///
/// # Arguments
///
/// * `run` - Metadata about the crawl
/// * `corpus` - The crawl result
///
/// # Returns
///
/// A formatted markdown string
pub fn format_markdown(run: &CrawlRun, corpus: &Corpus) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Crawl of {}\n\n", run.start_url));

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Tag**: {}\n", run.tag));
    md.push_str(&format!("- **Started**: {}\n", run.started_at.to_rfc3339()));
    md.push_str(&format!(
        "- **Finished**: {}\n",
        run.finished_at.to_rfc3339()
    ));
    md.push_str(&format!(
        "- **Duration**: {} seconds\n",
        run.duration_seconds()
    ));
    md.push_str(&format!(
        "- **Status**: {}\n",
        if run.cancelled { "cancelled" } else { "completed" }
    ));
    md.push_str(&format!("- **Config Hash**: {}\n\n", run.config_hash));

    // Counters
    let stats = corpus.stats();
    md.push_str("## Statistics\n\n");
    md.push_str(&format!("- **Pages**: {}\n", corpus.len()));
    md.push_str(&format!("- **Fetched**: {}\n", stats.fetched));
    md.push_str(&format!("- **Soft Failures**: {}\n", stats.failed));
    md.push_str(&format!("- **Skipped (depth)**: {}\n", stats.skipped_depth));
    md.push_str(&format!(
        "- **Skipped (duplicate)**: {}\n",
        stats.skipped_duplicate
    ));
    md.push_str(&format!("- **Links Enqueued**: {}\n", stats.links_enqueued));
    md.push_str(&format!(
        "- **Links Discarded**: {}\n\n",
        stats.links_discarded
    ));

    if !corpus.failures().is_empty() {
        md.push_str("## Failures\n\n");
        md.push_str("| URL | Depth | Error |\n");
        md.push_str("|-----|-------|-------|\n");
        for failure in corpus.failures() {
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                failure.url, failure.depth, failure.error
            ));
        }
        md.push('\n');
    }

    md.push_str("## Pages\n\n");
    for (index, page) in corpus.pages().iter().enumerate() {
        md.push_str(&format!("### {}. {}\n\n", index + 1, page.url));
        if page.content.is_empty() {
            md.push_str("_No content_\n\n");
        } else {
            md.push_str(&page.content);
            md.push_str("\n\n");
        }
    }

    md
}
