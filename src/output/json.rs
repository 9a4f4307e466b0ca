//! JSON corpus export
//!
//! Produces a single document with the run metadata, counters, pages and
//! soft failures, suitable for handing to an indexing pipeline.

use crate::corpus::{Corpus, CrawlStats, Page};
use crate::output::traits::{CorpusWriter, CrawlRun, OutputResult};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct FailureRecord<'a> {
    url: &'a str,
    depth: u32,
    error: String,
}

#[derive(Serialize)]
struct CorpusDocument<'a> {
    run: &'a CrawlRun,
    stats: &'a CrawlStats,
    pages: &'a [Page],
    failures: Vec<FailureRecord<'a>>,
}

/// Writes the corpus as pretty-printed JSON
pub struct JsonWriter<W: Write> {
    out: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> CorpusWriter for JsonWriter<W> {
    fn write_corpus(&mut self, run: &CrawlRun, corpus: &Corpus) -> OutputResult<()> {
        let document = CorpusDocument {
            run,
            stats: corpus.stats(),
            pages: corpus.pages(),
            failures: corpus
                .failures()
                .iter()
                .map(|f| FailureRecord {
                    url: &f.url,
                    depth: f.depth,
                    error: f.error.to_string(),
                })
                .collect(),
        };

        serde_json::to_writer_pretty(&mut self.out, &document)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{Page, SoftFailure};
    use crate::crawler::FetchError;
    use chrono::Utc;

    #[test]
    fn test_json_document_shape() {
        let mut corpus = Corpus::new();
        corpus.push(Page::new("https://x.com/", "Welcome", "acme"));
        corpus.push(Page::new("https://x.com/down", "", "acme"));
        corpus.record_failure(SoftFailure {
            url: "https://x.com/down".to_string(),
            depth: 1,
            error: FetchError::Timeout,
        });
        let run = CrawlRun::finished("https://x.com/", "acme", Utc::now(), "hash", &corpus);

        let mut writer = JsonWriter::new(Vec::new());
        writer.write_corpus(&run, &corpus).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&writer.into_inner()).unwrap();

        assert_eq!(value["run"]["tag"], "acme");
        assert_eq!(value["pages"].as_array().unwrap().len(), 2);
        assert_eq!(value["pages"][0]["content"], "Welcome");
        assert_eq!(value["failures"][0]["error"], "Request timed out");
        assert_eq!(value["stats"]["failed"], 1);
    }
}
