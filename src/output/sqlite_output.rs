//! SQLite corpus export
//!
//! Appends each crawl as a run with its pages and soft failures, so several
//! crawls (for different tags) can share one database.

use crate::corpus::Corpus;
use crate::output::schema::initialize_schema;
use crate::output::traits::{CorpusWriter, CrawlRun, OutputResult};
use rusqlite::{params, Connection};
use std::path::Path;

/// SQLite-based corpus writer
pub struct SqliteWriter {
    conn: Connection,
}

impl SqliteWriter {
    /// Opens (or creates) an export database
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteWriter)` - Successfully opened/created database
    /// * `Err(OutputError)` - Failed to open database
    pub fn new(path: &Path) -> OutputResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> OutputResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Number of pages stored for a tag, across all runs
    pub fn count_pages_for_tag(&self, tag: &str) -> OutputResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM pages WHERE tag = ?1",
            params![tag],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    /// Number of runs recorded
    pub fn count_runs(&self) -> OutputResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM runs", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

impl CorpusWriter for SqliteWriter {
    fn write_corpus(&mut self, run: &CrawlRun, corpus: &Corpus) -> OutputResult<()> {
        let tx = self.conn.transaction()?;

        tx.execute(
            "INSERT INTO runs (start_url, tag, started_at, finished_at, config_hash, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                run.start_url,
                run.tag,
                run.started_at.to_rfc3339(),
                run.finished_at.to_rfc3339(),
                run.config_hash,
                if run.cancelled { "cancelled" } else { "completed" },
            ],
        )?;
        let run_id = tx.last_insert_rowid();

        {
            let mut insert_page = tx.prepare(
                "INSERT INTO pages (run_id, position, url, tag, content) VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for (position, page) in corpus.pages().iter().enumerate() {
                insert_page.execute(params![
                    run_id,
                    position as i64,
                    page.url,
                    page.tag,
                    page.content
                ])?;
            }

            let mut insert_failure = tx.prepare(
                "INSERT INTO failures (run_id, url, depth, error_message) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for failure in corpus.failures() {
                insert_failure.execute(params![
                    run_id,
                    failure.url,
                    failure.depth,
                    failure.error.to_string()
                ])?;
            }
        }

        tx.commit()?;

        tracing::debug!(
            "Stored run {} with {} pages and {} failures",
            run_id,
            corpus.len(),
            corpus.failures().len()
        );

        Ok(())
    }
}
