//! Structured minutes types.
//!
//! All types serialize to camelCase JSON.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One row of proceedings: a motion, item, or sub-item.
///
/// Top-level entries may carry children; children never do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// When the entry was recorded, if its timestamp could be parsed.
    pub timestamp: Option<NaiveDateTime>,

    /// Reconstructed text, possibly empty.
    pub content: String,

    /// Nested sub-entries in document order.
    #[serde(default)]
    pub children: Vec<Entry>,
}

impl Entry {
    /// Creates an entry without children.
    #[must_use]
    pub fn new(timestamp: Option<NaiveDateTime>, content: impl Into<String>) -> Self {
        Self {
            timestamp,
            content: content.into(),
            children: Vec::new(),
        }
    }

    /// Replaces the children of this entry.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Entry>) -> Self {
        self.children = children;
        self
    }
}

/// The parsed minutes of one sitting day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinutesSnapshot {
    /// Sitting date reported by the page.
    pub date: NaiveDate,

    /// Document revision the snapshot was parsed from.
    pub revision: u64,

    /// Top-level entries in document order.
    pub entries: Vec<Entry>,
}

/// Result of a refresh, either structured or flattened to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MinutesView {
    Structured(MinutesSnapshot),
    Flat(String),
}
