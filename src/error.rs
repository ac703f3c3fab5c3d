//! Error types for the reflow engine.

use std::io;
use thiserror::Error;

/// Result type alias for reflow operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reconstructing a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading an extraction dump or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The source extraction interface failed for a page.
    #[error("Extraction failed on page {page}: {message}")]
    Source {
        /// 0-based page index
        page: usize,
        /// Failure description reported by the source
        message: String,
    },

    /// Page index is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(usize, usize),

    /// The document builder rejected a call.
    #[error("Builder error: {0}")]
    Builder(String),

    /// Reconstruction was cancelled before the given page was emitted.
    #[error("Reconstruction cancelled before page {page}")]
    Cancelled {
        /// 0-based index of the first page that was not emitted
        page: usize,
    },
}

impl Error {
    /// Build a [`Error::Source`] for the given page.
    pub fn source(page: usize, message: impl Into<String>) -> Self {
        Error::Source {
            page,
            message: message.into(),
        }
    }

    /// Build a [`Error::Builder`].
    pub fn builder(message: impl Into<String>) -> Self {
        Error::Builder(message.into())
    }

    /// Check if this error is a page-level extraction failure.
    pub fn is_page_failure(&self) -> bool {
        matches!(self, Error::Source { .. } | Error::PageOutOfRange(..))
    }
}
