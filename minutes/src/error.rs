//! Error types for auspol-minutes.
//!
//! Only failures that abort a whole fetch cycle surface here. Per-entry
//! problems (an unparsable timestamp) and a missing revision marker are
//! logged and recovered from where they occur.

use thiserror::Error;

use crate::config::ConfigError;
use crate::fetcher::FetchError;
use crate::parser::ParseError;

/// Errors that can occur during a minutes fetch cycle.
#[derive(Error, Debug)]
pub enum MinutesError {
    /// Configuration-related error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The page could not be fetched.
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// The page was fetched but is not a minutes page.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

impl MinutesError {
    /// Whether the upstream answered with a non-success status.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Fetch(FetchError::Unavailable { .. }))
    }
}

/// A specialized `Result` type for minutes operations.
pub type Result<T> = std::result::Result<T, MinutesError>;
