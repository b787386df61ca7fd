//! Live minutes page parser.
//!
//! Extracts the sitting date and the entry tree from the `div.box.draft`
//! container of a live minutes page.
//!
//! # Page Structure
//!
//! | Element | Meaning |
//! |---------|---------|
//! | `div.box.draft` | Container for the whole draft |
//! | second `p` of the container | Sitting date, e.g. `Thursday, 5 March 2015` |
//! | `div.programItem.itemRow` | Top-level entry |
//! | `div.itemRow` inside a top-level entry | Child entry |
//! | `div.timeStamp` | Entry time, e.g. `-  11:16:51 AM` |
//! | `div.itemContent` | Entry text as `p` blocks of `span` fragments |
//!
//! # Example Usage
//!
//! ```
//! use auspol_minutes::markup::Page;
//! use auspol_minutes::parser::{find_draft, parse_entries, parse_minutes_date};
//!
//! let page = Page::parse(r#"<div class="box draft"><p>Live</p><p>Thursday, 5 March 2015</p>
//!     <div class="programItem itemRow">
//!         <div class="timeStamp">9:30:00 AM</div>
//!         <div class="itemContent"><p><span>Prayers</span></p></div>
//!     </div></div>"#);
//! let root = page.root();
//! let draft = find_draft(&root).unwrap();
//! let date = parse_minutes_date(&draft).unwrap();
//! let entries = parse_entries(&draft, date);
//! assert_eq!(entries[0].content, "Prayers");
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;
use tracing::debug;

use crate::content::reconstruct_content;
use crate::markup::Region;
use crate::timestamp::parse_timestamp;
use crate::types::Entry;

const DRAFT_CLASS: &str = "box draft";
const PROGRAM_ITEM_CLASS: &str = "programItem itemRow";
const ITEM_ROW_CLASS: &str = "itemRow";
const TIMESTAMP_CLASS: &str = "timeStamp";
const CONTENT_CLASS: &str = "itemContent";

/// Format of the sitting date in the page header.
pub const DATE_FORMAT: &str = "%A, %d %B %Y";

/// Position of the date paragraph among the container's `p` elements.
const DATE_PARAGRAPH_INDEX: usize = 1;

/// Errors that abort parsing of a page.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The page has no `div.box.draft` container.
    #[error("minutes container not found")]
    MissingContainer,

    /// The container has no date paragraph.
    #[error("sitting date not found")]
    MissingDate,

    /// The date paragraph does not hold a date in the expected format.
    #[error("invalid sitting date: {0:?}")]
    InvalidDate(String),
}

/// Finds the draft container of a minutes page.
#[must_use]
pub fn find_draft<R: Region>(root: &R) -> Option<R> {
    root.find("div", Some(DRAFT_CLASS))
}

/// Parses the sitting date from the draft container header.
///
/// # Errors
///
/// Returns [`ParseError::MissingDate`] if the header paragraph is absent and
/// [`ParseError::InvalidDate`] if it does not match [`DATE_FORMAT`].
pub fn parse_minutes_date<R: Region>(draft: &R) -> Result<NaiveDate, ParseError> {
    let paragraph = draft
        .find_all("p", None)
        .into_iter()
        .nth(DATE_PARAGRAPH_INDEX)
        .ok_or(ParseError::MissingDate)?;

    let text = paragraph
        .visible_text()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    NaiveDate::parse_from_str(&text, DATE_FORMAT).map_err(|_| ParseError::InvalidDate(text))
}

/// Parses every top-level entry of the draft container, with children.
///
/// Entries missing a timestamp or content are kept.
#[must_use]
pub fn parse_entries<R: Region>(draft: &R, date: NaiveDate) -> Vec<Entry> {
    let entries: Vec<Entry> = draft
        .find_all("div", Some(PROGRAM_ITEM_CLASS))
        .iter()
        .map(|item| {
            let children = item
                .find_all("div", Some(ITEM_ROW_CLASS))
                .iter()
                .map(|row| parse_item_row(row, date))
                .collect();
            parse_item_row(item, date).with_children(children)
        })
        .collect();

    debug!(entries = entries.len(), %date, "parsed minutes entries");
    entries
}

/// Parses the timestamp and content of a single row, without children.
#[must_use]
pub fn parse_item_row<R: Region>(row: &R, date: NaiveDate) -> Entry {
    let timestamp: Option<NaiveDateTime> = row
        .find("div", Some(TIMESTAMP_CLASS))
        .and_then(|div| parse_timestamp(&div, date));

    let content = row
        .find("div", Some(CONTENT_CLASS))
        .map(|div| reconstruct_content(&div))
        .unwrap_or_default();

    Entry::new(timestamp, content)
}
