//! Document revision tracking.
//!
//! The live minutes page embeds the id of the document revision it was
//! rendered from in an inline script:
//!
//! ```text
//! var loadedDocumentId = 20150305152724;
//! ```
//!
//! The id grows with every server-side edit, so comparing it with the last
//! id seen tells whether the page needs reparsing without diffing markup.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, error};

use crate::markup::Region;

/// Stored revision before any page has been checked.
pub const INITIAL_REVISION: u64 = 0;

static DOCUMENT_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"var\s+loadedDocumentId\s*=\s*(\d+)\s*;").expect("valid document id regex")
});

/// Outcome of checking a page against the stored revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevisionCheck {
    /// The page carries a revision newer than the one stored.
    Updated,
    /// The page carries the stored revision or an older one.
    Unchanged,
    /// No revision marker was found; the stored revision is untouched.
    MarkerMissing,
}

impl RevisionCheck {
    /// Whether the page should be reparsed.
    #[must_use]
    pub fn is_update(self) -> bool {
        matches!(self, Self::Updated)
    }
}

/// Returns the first revision id found in the page's scripts.
#[must_use]
pub fn extract_revision<R: Region>(page: &R) -> Option<u64> {
    page.script_texts().iter().find_map(|script| {
        DOCUMENT_ID_RE
            .captures_iter(script)
            .find_map(|caps| caps[1].parse::<u64>().ok())
    })
}

/// Tracks the last revision id seen by a session.
#[derive(Debug, Clone)]
pub struct RevisionTracker {
    current: u64,
}

impl Default for RevisionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl RevisionTracker {
    /// Creates a tracker that has seen no revision yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: INITIAL_REVISION,
        }
    }

    /// The last revision id stored.
    #[must_use]
    pub fn current(&self) -> u64 {
        self.current
    }

    /// Checks the revision marker of `page` against the stored id.
    ///
    /// When a marker is found it always replaces the stored id, even if it is
    /// older; only the returned signal depends on the comparison.
    pub fn check<R: Region>(&mut self, page: &R) -> RevisionCheck {
        match extract_revision(page) {
            Some(id) => self.observe(id),
            None => {
                error!(stored = self.current, "unable to find document revision id");
                RevisionCheck::MarkerMissing
            }
        }
    }

    /// Records `id` as the current revision.
    pub fn observe(&mut self, id: u64) -> RevisionCheck {
        let previous = self.current;
        self.current = id;

        if id > previous {
            debug!(previous, current = id, "new document revision");
            RevisionCheck::Updated
        } else {
            debug!(previous, current = id, "document revision unchanged");
            RevisionCheck::Unchanged
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::Page;

    const DOCUMENT_ID_EXAMPLE: &str = r#"
        <div class="box draft"><script>
            var loadedDocumentId = 20150305152724;
            $( document ).ready(function() {
        </script><div>"#;

    #[test]
    fn extracts_marker_from_script() {
        let page = Page::parse(DOCUMENT_ID_EXAMPLE);
        assert_eq!(extract_revision(&page.root()), Some(20150305152724));
    }

    #[test]
    fn same_marker_twice_updates_once() {
        let page = Page::parse(DOCUMENT_ID_EXAMPLE);
        let mut tracker = RevisionTracker::new();

        assert_eq!(tracker.check(&page.root()), RevisionCheck::Updated);
        assert_eq!(tracker.check(&page.root()), RevisionCheck::Unchanged);
        assert_eq!(tracker.current(), 20150305152724);
    }

    #[test]
    fn older_marker_is_stored_but_not_an_update() {
        let mut tracker = RevisionTracker::new();
        assert!(tracker.observe(10).is_update());
        assert_eq!(tracker.observe(7), RevisionCheck::Unchanged);
        assert_eq!(tracker.current(), 7);
        assert!(tracker.observe(8).is_update());
    }

    #[test]
    fn missing_marker_leaves_state_untouched() {
        let page = Page::parse("<script>var somethingElse = 5;</script>");
        let mut tracker = RevisionTracker::new();
        tracker.observe(42);

        assert_eq!(tracker.check(&page.root()), RevisionCheck::MarkerMissing);
        assert!(!RevisionCheck::MarkerMissing.is_update());
        assert_eq!(tracker.current(), 42);
    }

    #[test]
    fn first_script_with_marker_wins() {
        let page = Page::parse(
            "<script>var a = 1;</script>\
             <script>var loadedDocumentId = 3;</script>\
             <script>var loadedDocumentId = 9;</script>",
        );
        assert_eq!(extract_revision(&page.root()), Some(3));
    }

    #[test]
    fn marker_outside_script_is_ignored() {
        let page = Page::parse("<p>var loadedDocumentId = 3;</p>");
        assert_eq!(extract_revision(&page.root()), None);
    }

    #[test]
    fn zero_marker_from_initial_state_is_not_an_update() {
        let mut tracker = RevisionTracker::new();
        assert_eq!(tracker.observe(0), RevisionCheck::Unchanged);
    }
}
