//! Live minutes session.
//!
//! A [`MinutesSession`] follows one minutes page. Each [`refresh`] fetches
//! the page, reads its revision marker, and reparses the entry tree only when
//! the revision moved forward; otherwise the cached snapshot is returned.
//!
//! Snapshots are kept per sitting date, so a session left running across
//! sitting days can still answer [`get_cached`] for earlier days.
//!
//! [`refresh`]: MinutesSession::refresh
//! [`get_cached`]: MinutesSession::get_cached
//!
//! # Example
//!
//! ```no_run
//! use auspol_minutes::config::Config;
//! use auspol_minutes::session::MinutesSession;
//! use auspol_minutes::types::MinutesView;
//!
//! #[tokio::main]
//! async fn main() -> auspol_minutes::Result<()> {
//!     let mut session = MinutesSession::from_config(&Config::default())?;
//!     if let MinutesView::Flat(text) = session.refresh(true).await? {
//!         print!("{text}");
//!     }
//!     Ok(())
//! }
//! ```

use std::collections::btree_map::Entry as CacheSlot;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::Result;
use crate::fetcher::Fetcher;
use crate::markup::Page;
use crate::parser::{find_draft, parse_entries, parse_minutes_date, ParseError};
use crate::revision::{RevisionCheck, RevisionTracker};
use crate::types::{MinutesSnapshot, MinutesView};

/// Flattens a snapshot to plain text.
///
/// Each top-level entry's content is followed by a newline, then each of its
/// children's content followed by a newline. Timestamps are dropped.
#[must_use]
pub fn flatten(snapshot: &MinutesSnapshot) -> String {
    let mut text = String::new();
    for entry in &snapshot.entries {
        text.push_str(&entry.content);
        text.push('\n');
        for child in &entry.children {
            text.push_str(&child.content);
            text.push('\n');
        }
    }
    text
}

/// One followed minutes page and its cached state.
pub struct MinutesSession {
    fetcher: Fetcher,
    revisions: RevisionTracker,
    snapshots: BTreeMap<NaiveDate, MinutesSnapshot>,
}

impl MinutesSession {
    /// Creates a session around `fetcher` with no revision seen.
    #[must_use]
    pub fn new(fetcher: Fetcher) -> Self {
        Self {
            fetcher,
            revisions: RevisionTracker::new(),
            snapshots: BTreeMap::new(),
        }
    }

    /// Creates a session for the page and timeout in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = Fetcher::new(config.minutes_url.clone(), config.timeout())?;
        Ok(Self::new(fetcher))
    }

    /// The page URL this session follows.
    #[must_use]
    pub fn url(&self) -> &str {
        self.fetcher.url()
    }

    /// The last revision id seen.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revisions.current()
    }

    /// Fetches the page and returns the current minutes.
    ///
    /// With `flat` set the minutes are returned as [`flatten`]ed text.
    ///
    /// # Errors
    ///
    /// Returns `MinutesError::Fetch` if the page cannot be fetched or answers
    /// with a non-success status, and `MinutesError::Parse` if it has no
    /// minutes container or sitting date. Session state is unchanged on error.
    pub async fn refresh(&mut self, flat: bool) -> Result<MinutesView> {
        let html = self.fetcher.fetch_page().await?;
        let snapshot = self.ingest(&html)?;

        Ok(if flat {
            MinutesView::Flat(flatten(snapshot))
        } else {
            MinutesView::Structured(snapshot.clone())
        })
    }

    /// Processes fetched page text.
    ///
    /// The entry tree is reparsed when the page carries a newer revision, or
    /// when nothing is cached yet for its sitting date. Otherwise the cached
    /// snapshot for that date is returned untouched.
    ///
    /// # Errors
    ///
    /// Returns `MinutesError::Parse` if the page has no minutes container or
    /// sitting date; the revision and cache are then left unchanged.
    pub fn ingest(&mut self, html: &str) -> Result<&MinutesSnapshot> {
        let page = Page::parse(html);
        let root = page.root();
        let draft = find_draft(&root).ok_or(ParseError::MissingContainer)?;
        let date = parse_minutes_date(&draft)?;

        let check = self.revisions.check(&root);
        let revision = self.revisions.current();
        let parse = || {
            let entries = parse_entries(&draft, date);
            info!(%date, revision, entries = entries.len(), "Parsed minutes");
            MinutesSnapshot {
                date,
                revision,
                entries,
            }
        };

        let snapshot = match self.snapshots.entry(date) {
            CacheSlot::Occupied(mut slot) => {
                if check.is_update() {
                    slot.insert(parse());
                } else {
                    debug!(%date, ?check, "Reusing cached minutes");
                }
                slot.into_mut()
            }
            CacheSlot::Vacant(slot) => {
                if check == RevisionCheck::Unchanged {
                    debug!(%date, "No cached minutes for date, parsing");
                }
                slot.insert(parse())
            }
        };

        Ok(snapshot)
    }

    /// Cached snapshot for `date`, without fetching.
    #[must_use]
    pub fn get_cached(&self, date: NaiveDate) -> Option<&MinutesSnapshot> {
        self.snapshots.get(&date)
    }

    /// Cached snapshot for `date` as flattened text, without fetching.
    #[must_use]
    pub fn get_cached_flat(&self, date: NaiveDate) -> Option<String> {
        self.get_cached(date).map(flatten)
    }

    /// Most recent sitting date with a cached snapshot.
    #[must_use]
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.snapshots.keys().next_back().copied()
    }
}
