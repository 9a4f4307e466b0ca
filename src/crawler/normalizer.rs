//! Content normalization
//!
//! This module turns fetched markup into readable, markdown-like text and
//! collects the outbound links the markup contains.
//!
//! Anchor targets never leak into the text: by default an anchor is rendered
//! as its inner text only.

use crate::url::resolve;
use htmd::{Element, HtmlToMarkdown};
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use url::Url;

/// Elements whose content is never part of the readable text
const SKIPPED_TAGS: &[&str] = &["head", "script", "style", "noscript", "template"];

/// How anchor elements are rendered in normalized text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnchorPolicy {
    /// Keep the anchor's text, drop its target
    #[default]
    KeepText,

    /// Drop the anchor entirely
    Drop,
}

/// Outbound links found in a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkScan {
    /// Resolved links, in document order
    pub links: Vec<Url>,

    /// Anchors whose target could not be resolved
    pub discarded: usize,
}

/// Converts markup into corpus text and extracts links
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    anchors: AnchorPolicy,
}

impl Normalizer {
    pub fn new(anchors: AnchorPolicy) -> Self {
        Self { anchors }
    }

    pub fn anchor_policy(&self) -> AnchorPolicy {
        self.anchors
    }

    /// Converts markup to clean, link-free text
    ///
    /// Malformed markup is parsed best-effort. If conversion fails the plain
    /// text nodes of the document are used instead. Input without any markup
    /// is already text and only has its whitespace tidied, so feeding the
    /// result back in changes nothing.
    pub fn to_text(&self, markup: &str) -> String {
        if markup.trim().is_empty() {
            return String::new();
        }
        if !contains_markup(markup) {
            return tidy(markup);
        }

        let converter = self.converter();
        let markdown = match converter.convert(markup) {
            Ok(markdown) => markdown,
            Err(e) => {
                tracing::debug!("Markdown conversion failed, using text nodes: {}", e);
                let document = Html::parse_document(markup);
                document.root_element().text().collect::<Vec<_>>().join(" ")
            }
        };

        tidy(&escape_tag_openers(&markdown))
    }

    /// Collects every anchor target, resolved against `base`
    ///
    /// Links that fail resolution are dropped. Order is document order.
    pub fn extract_links(&self, markup: &str, base: &Url) -> Vec<Url> {
        scan_links(markup, base).links
    }

    fn converter(&self) -> HtmlToMarkdown {
        let builder = HtmlToMarkdown::builder().skip_tags(SKIPPED_TAGS.to_vec());

        match self.anchors {
            AnchorPolicy::KeepText => builder
                .add_handler(vec!["a"], |element: Element| {
                    Some(element.content.to_string())
                })
                .build(),
            AnchorPolicy::Drop => builder
                .add_handler(vec!["a"], |_: Element| Some(String::new()))
                .build(),
        }
    }
}

/// Scans markup for anchors, keeping count of unresolvable ones
pub fn scan_links(markup: &str, base: &Url) -> LinkScan {
    let mut scan = LinkScan::default();

    let Ok(selector) = Selector::parse("a[href]") else {
        return scan;
    };

    let document = Html::parse_document(markup);
    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        match resolve(href, base) {
            Ok(url) => scan.links.push(url),
            Err(e) => {
                tracing::trace!("Discarding link {:?} on {}: {}", href, base, e);
                scan.discarded += 1;
            }
        }
    }

    scan
}

/// Returns true if the input parses to anything other than text nodes
fn contains_markup(text: &str) -> bool {
    let fragment = Html::parse_fragment(text);
    fragment
        .root_element()
        .descendants()
        .skip(1)
        .any(|node| !node.value().is_text())
}

/// Escapes `<` where it would open a tag, comment or declaration
///
/// Decoded entities such as `&lt;b&gt;` must not read as markup later.
fn escape_tag_openers(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        let opens_tag = c == '<'
            && chars
                .peek()
                .is_some_and(|next| next.is_ascii_alphabetic() || matches!(*next, '/' | '!' | '?'));
        if opens_tag {
            out.push_str("&lt;");
        } else {
            out.push(c);
        }
    }

    out
}

/// Trims trailing spaces and collapses runs of blank lines
fn tidy(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = 0;

    for line in text.lines() {
        let line = line.trim_end();
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 || out.is_empty() {
                continue;
            }
            out.push('\n');
        } else {
            blank_run = 0;
            out.push_str(line);
            out.push('\n');
        }
    }

    out.trim().to_string()
}
