//! Error types for the card database.
//!
//! Lookups never fail: a missing card or a missing alternative print is an
//! absent value. Errors are reserved for the collaborators the database
//! reads from (card readers, template files).

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building the database or its catalogs.
#[derive(Debug, Error)]
pub enum CardDbError {
    /// A catalog file exists but could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A catalog file contains a line that does not parse.
    #[error("{}:{line}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// The external card or edition reader failed. Passed through unchanged.
    #[error("card reader failed: {0}")]
    Reader(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// An art preference name that matches none of the known policies.
    #[error("unknown card art preference: {0:?}")]
    UnknownArtPreference(String),

    /// A date literal that is not `YYYY-MM-DD`.
    #[error("invalid date {0:?}")]
    InvalidDate(String),
}

impl CardDbError {
    /// Wrap an arbitrary reader failure.
    pub fn reader(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        CardDbError::Reader(err.into())
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        CardDbError::Parse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, CardDbError>;
