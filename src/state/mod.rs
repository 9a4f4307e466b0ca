//! State management module
//!
//! This module defines the lifecycle of a URL within a single crawl.

mod url_state;

pub use url_state::UrlState;
