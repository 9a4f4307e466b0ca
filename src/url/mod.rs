//! URL handling module
//!
//! Resolves links found in fetched documents into absolute, fetchable URLs.
//! A link that cannot be resolved is skipped by the caller; it never aborts
//! a crawl.

mod resolve;

pub use resolve::{parse_seed, resolve};

use url::Url;

/// Returns true if the URL points at a PDF document by its path suffix
///
/// # Examples
///
/// ```
/// use url::Url;
/// use seedcrawl::url::has_pdf_extension;
///
/// assert!(has_pdf_extension(&Url::parse("https://x.com/report.PDF").unwrap()));
/// assert!(!has_pdf_extension(&Url::parse("https://x.com/pdf/index.html").unwrap()));
/// ```
pub fn has_pdf_extension(url: &Url) -> bool {
    url.path().to_ascii_lowercase().ends_with(".pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_extension_ignores_query() {
        let url = Url::parse("https://x.com/files/brochure.pdf?download=1").unwrap();
        assert!(has_pdf_extension(&url));
    }

    #[test]
    fn test_html_is_not_pdf() {
        let url = Url::parse("https://x.com/about").unwrap();
        assert!(!has_pdf_extension(&url));
    }
}
