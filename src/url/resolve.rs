use crate::UrlError;
use url::Url;

/// Schemes the crawler can fetch
const FETCHABLE_SCHEMES: &[&str] = &["http", "https"];

/// Resolves a (possibly relative) link against a base URL
///
/// # Resolution Rules
///
/// 1. Trim surrounding whitespace; reject empty links
/// 2. Join against the base per RFC 3986 (scheme-relative, path-relative,
///    absolute links all handled by [`Url::join`])
/// 3. Reject results whose scheme is not `http` or `https`
///    (`javascript:`, `mailto:`, `tel:`, `data:`, ...)
/// 4. Drop the fragment, so `#section` collapses to the base itself
///
/// # Arguments
///
/// * `href` - The link as written in the document
/// * `base` - The URL of the document the link was found in
///
/// # Returns
///
/// * `Ok(Url)` - Absolute, fetchable URL
/// * `Err(UrlError)` - The link cannot be followed and should be skipped
///
/// # Examples
///
/// ```
/// use url::Url;
/// use seedcrawl::url::resolve;
///
/// let base = Url::parse("https://x.com/a/b").unwrap();
/// assert_eq!(resolve("/about", &base).unwrap().as_str(), "https://x.com/about");
/// assert!(resolve("javascript:void(0)", &base).is_err());
/// ```
pub fn resolve(href: &str, base: &Url) -> Result<Url, UrlError> {
    let href = href.trim();
    if href.is_empty() {
        return Err(UrlError::Empty);
    }

    let mut url = base
        .join(href)
        .map_err(|e| UrlError::Malformed(format!("{}: {}", href, e)))?;

    ensure_fetchable(&url)?;
    url.set_fragment(None);

    Ok(url)
}

/// Parses an absolute seed URL under the same rules as [`resolve`]
pub fn parse_seed(url_str: &str) -> Result<Url, UrlError> {
    let trimmed = url_str.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let mut url =
        Url::parse(trimmed).map_err(|e| UrlError::Malformed(format!("{}: {}", trimmed, e)))?;

    ensure_fetchable(&url)?;
    url.set_fragment(None);

    Ok(url)
}

fn ensure_fetchable(url: &Url) -> Result<(), UrlError> {
    if !FETCHABLE_SCHEMES.contains(&url.scheme()) {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::Malformed(format!("{} has no host", url)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://x.com/a/b").unwrap()
    }

    #[test]
    fn test_root_relative_link() {
        assert_eq!(
            resolve("/about", &base()).unwrap().as_str(),
            "https://x.com/about"
        );
    }

    #[test]
    fn test_path_relative_link() {
        assert_eq!(
            resolve("c", &base()).unwrap().as_str(),
            "https://x.com/a/c"
        );
        assert_eq!(
            resolve("../up", &base()).unwrap().as_str(),
            "https://x.com/up"
        );
    }

    #[test]
    fn test_scheme_relative_link() {
        assert_eq!(
            resolve("//cdn.x.com/file", &base()).unwrap().as_str(),
            "https://cdn.x.com/file"
        );
    }

    #[test]
    fn test_absolute_link_passes_through() {
        assert_eq!(
            resolve("http://other.org/page?q=1", &base()).unwrap().as_str(),
            "http://other.org/page?q=1"
        );
    }

    #[test]
    fn test_fragment_only_collapses_to_base() {
        assert_eq!(resolve("#team", &base()).unwrap(), base());
    }

    #[test]
    fn test_fragment_removed() {
        assert_eq!(
            resolve("/docs#install", &base()).unwrap().as_str(),
            "https://x.com/docs"
        );
    }

    #[test]
    fn test_empty_link_rejected() {
        assert_eq!(resolve("", &base()), Err(UrlError::Empty));
        assert_eq!(resolve("   ", &base()), Err(UrlError::Empty));
    }

    #[test]
    fn test_non_fetchable_schemes_rejected() {
        for href in [
            "javascript:void(0)",
            "mailto:someone@x.com",
            "tel:+15551234",
            "data:text/plain,hello",
        ] {
            assert!(
                matches!(resolve(href, &base()), Err(UrlError::InvalidScheme(_))),
                "{} should be rejected",
                href
            );
        }
    }

    #[test]
    fn test_unparsable_link_rejected() {
        assert!(matches!(
            resolve("http://[::1", &base()),
            Err(UrlError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_seed() {
        assert_eq!(
            parse_seed(" https://x.com/start#top ").unwrap().as_str(),
            "https://x.com/start"
        );
        assert!(parse_seed("not a url").is_err());
        assert!(parse_seed("ftp://x.com/file").is_err());
        assert!(parse_seed("").is_err());
    }
}
