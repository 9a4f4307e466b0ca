//! Seedcrawl main entry point
//!
//! This is the command-line interface for the Seedcrawl corpus crawler.

use chrono::Utc;
use clap::Parser;
use seedcrawl::config::{compute_config_hash, load_config, validate, Config};
use seedcrawl::crawler::{crawl, AnchorPolicy};
use seedcrawl::output::{write_corpus, CrawlRun, OutputFormat};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Seedcrawl: a bounded breadth-first corpus crawler
///
/// Seedcrawl walks the pages linked from a seed URL up to a depth and page
/// limit, converts HTML and PDF content to text, and exports the result.
#[derive(Parser, Debug)]
#[command(name = "seedcrawl")]
#[command(version)]
#[command(about = "A bounded breadth-first corpus crawler", long_about = None)]
struct Cli {
    /// Seed URL to start crawling from
    #[arg(value_name = "URL")]
    url: String,

    /// Label attached to every page (e.g. a company or source name)
    #[arg(short, long)]
    tag: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum link-hops from the seed URL
    #[arg(long)]
    max_depth: Option<u32>,

    /// Maximum number of pages to collect
    #[arg(long)]
    max_pages: Option<u32>,

    /// Number of concurrent fetches (1 keeps strict breadth-first order)
    #[arg(long)]
    concurrency: Option<u32>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Stop the crawl after this many seconds and keep what was collected
    #[arg(long, value_name = "SECS")]
    deadline: Option<u64>,

    /// Endpoint of the PDF-to-text extraction service
    #[arg(long, value_name = "URL")]
    pdf_endpoint: Option<String>,

    /// Drop anchor text from normalized pages instead of keeping it
    #[arg(long)]
    drop_anchor_text: bool,

    /// Export format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Output file (stdout when omitted; required for sqlite)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return Err(e);
        }
    };
    let config_hash = compute_config_hash(&config);
    tracing::info!("Configuration ready (hash: {})", config_hash);

    // Ctrl-C stops the crawl; the partial corpus is still exported
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping crawl");
            on_interrupt.cancel();
        }
    });

    let started_at = Utc::now();
    let corpus = match crawl(&config, &cli.url, &cli.tag, cancel).await {
        Ok(corpus) => corpus,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    let run = CrawlRun::finished(&cli.url, &cli.tag, started_at, config_hash, &corpus);
    write_corpus(cli.format, cli.output.as_deref(), &run, &corpus)?;

    if let Some(path) = &cli.output {
        tracing::info!("Corpus written to {}", path.display());
    }

    Ok(())
}

/// Loads the config file, if any, and applies command-line overrides
fn build_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };

    if let Some(depth) = cli.max_depth {
        config.crawler.max_depth = depth;
    }
    if let Some(pages) = cli.max_pages {
        config.crawler.max_pages = pages;
    }
    if let Some(concurrency) = cli.concurrency {
        config.crawler.concurrency = concurrency;
    }
    if let Some(timeout) = cli.timeout {
        config.crawler.request_timeout = timeout;
    }
    if cli.deadline.is_some() {
        config.crawler.deadline = cli.deadline;
    }
    if cli.pdf_endpoint.is_some() {
        config.pdf.endpoint = cli.pdf_endpoint.clone();
    }
    if cli.drop_anchor_text {
        config.crawler.anchor_policy = AnchorPolicy::Drop;
    }

    validate(&config)?;
    Ok(config)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("seedcrawl=info,warn"),
            1 => EnvFilter::new("seedcrawl=debug,info"),
            2 => EnvFilter::new("seedcrawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so stdout stays clean for exported corpora
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
