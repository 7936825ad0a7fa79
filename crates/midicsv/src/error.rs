//! Errors raised while reading `midicsv` text.

use thiserror::Error;

/// Why a single line could not be turned into an [`EventRecord`](crate::EventRecord).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("expected at least 3 fields (track, time, kind), found {found}")]
    MissingFields { found: usize },

    #[error("invalid track number {0:?}")]
    InvalidTrack(String),

    #[error("invalid time {0:?}")]
    InvalidTime(String),

    #[error("{kind} requires a channel field")]
    MissingChannel { kind: String },

    #[error("invalid channel {value:?} for {kind} (expected 0-15)")]
    InvalidChannel { kind: String, value: String },

    #[error("{kind} requires at least {expected} parameters, found {found}")]
    TooFewParams {
        kind: String,
        expected: usize,
        found: usize,
    },

    #[error("unterminated quoted field starting at column {column}")]
    UnterminatedQuote { column: usize },
}

/// A malformed line, located in its document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("malformed record at line {line}: {reason} in {content:?}")]
    MalformedRecord {
        line: usize,
        content: String,
        reason: RecordError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
