//! Configuration module for Seedcrawl
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, and turning caller requests into validated crawl bounds.
//!
//! # Example
//!
//! ```no_run
//! use seedcrawl::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("seedcrawl.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlConfig, CrawlRequest, PdfConfig, UserAgentConfig, DEFAULT_MAX_DEPTH,
    DEFAULT_MAX_PAGES,
};

// Re-export parser and validation functions
pub use parser::{compute_config_hash, load_config, parse_config};
pub use validation::{resolve_request, validate, validate_crawl_config, MAX_CONCURRENCY};
