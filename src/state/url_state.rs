/// Per-URL state definitions for tracking crawl progress
///
/// This module defines the lifecycle a URL goes through within one crawl.
use std::fmt;

/// Represents where a URL is in the crawl process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlState {
    // ===== Active States =====
    /// Link was found in a fetched document
    Discovered,

    /// Entry is waiting in the frontier
    Queued,

    /// Body has been retrieved (possibly empty after a soft failure)
    Fetched,

    // ===== Terminal States =====
    /// Entry was dequeued beyond the maximum depth
    SkippedDepth,

    /// URL had already been fetched in this crawl
    SkippedDuplicate,

    /// Page was normalized and appended to the corpus
    Stored,
}

impl UrlState {
    /// Returns true if this is a terminal state (no further processing needed)
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::SkippedDepth | Self::SkippedDuplicate | Self::Stored
        )
    }

    /// Returns true if the URL was skipped without being fetched
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::SkippedDepth | Self::SkippedDuplicate)
    }

    /// Checks whether moving to `next` is a legal transition
    ///
    /// No URL ever re-enters an earlier state.
    pub fn can_transition_to(&self, next: UrlState) -> bool {
        use UrlState::*;

        matches!(
            (self, next),
            (Discovered, Queued)
                | (Queued, SkippedDepth)
                | (Queued, SkippedDuplicate)
                | (Queued, Fetched)
                | (Fetched, Stored)
        )
    }

    /// Short lowercase label, used in logs and exports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discovered => "discovered",
            Self::Queued => "queued",
            Self::Fetched => "fetched",
            Self::SkippedDepth => "skipped_depth",
            Self::SkippedDuplicate => "skipped_duplicate",
            Self::Stored => "stored",
        }
    }
}

impl fmt::Display for UrlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
