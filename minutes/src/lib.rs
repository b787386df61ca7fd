//! auspol-minutes - live draft minutes of the Australian Parliament.
//!
//! This crate follows the live "draft minutes" page published for a chamber
//! of the Australian House of Representatives and turns it into structured,
//! timestamped proceedings entries.
//!
//! # Overview
//!
//! The page is republished whenever the clerks edit the minutes, and carries
//! the id of the document revision it was rendered from. A session keeps the
//! last revision id seen and only reparses the page when that id grows, so
//! polling is cheap between edits.
//!
//! # Modules
//!
//! - [`types`]: Entry and snapshot types
//! - [`markup`]: Structural queries over parsed HTML
//! - [`timestamp`]: Entry timestamp parsing
//! - [`content`]: Entry text reconstruction
//! - [`revision`]: Document revision tracking
//! - [`parser`]: Page to entry tree parsing
//! - [`fetcher`]: HTTP client for the minutes page
//! - [`session`]: Fetch cycle orchestration and caching
//! - [`config`]: Configuration from environment variables
//! - [`error`]: Error types for minutes operations

pub mod config;
pub mod content;
pub mod error;
pub mod fetcher;
pub mod markup;
pub mod parser;
pub mod revision;
pub mod session;
pub mod timestamp;
pub mod types;

pub use config::{Chamber, Config, ConfigError};
pub use error::{MinutesError, Result};
pub use fetcher::{FetchError, Fetcher};
pub use markup::{Page, Region};
pub use parser::ParseError;
pub use revision::{RevisionCheck, RevisionTracker};
pub use session::{flatten, MinutesSession};
pub use types::{Entry, MinutesSnapshot, MinutesView};
