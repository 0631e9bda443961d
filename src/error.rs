//! Error types for the overpdf library.

use std::io;
use thiserror::Error;

/// Result type alias for overpdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during annotation processing.
///
/// Every variant that carries a `page` index is page-scoped: the pipeline
/// reports it in the run report and continues with the remaining pages.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error parsing or writing PDF structure.
    #[error("PDF error: {0}")]
    Pdf(String),

    /// A position record has a malformed or out-of-page bounding box.
    #[error("invalid geometry on page {page}: {detail}")]
    InvalidGeometry {
        /// Zero-based page index the record belongs to.
        page: usize,
        /// Human-readable description of the violated constraint.
        detail: String,
    },

    /// Strict sentence grouping found no terminal marker on a non-empty page.
    #[error("no terminal sentence markers found on page {page}")]
    NoTerminalMarkersFound {
        /// Zero-based page index.
        page: usize,
    },

    /// Overlay dimensions do not match the target page.
    #[error(
        "overlay for page {page} is {overlay_width}x{overlay_height} but the page is {page_width}x{page_height}"
    )]
    PageMismatch {
        page: usize,
        overlay_width: f32,
        overlay_height: f32,
        page_width: f32,
        page_height: f32,
    },

    /// Per-page processing exceeded the configured time budget.
    #[error("page {page} exceeded the {budget_ms} ms processing budget")]
    PageTimeout {
        /// Zero-based page index.
        page: usize,
        /// The configured budget in milliseconds.
        budget_ms: u64,
    },

    /// A page index was requested that the document does not contain.
    #[error("page index {0} is out of range (document has {1} pages)")]
    PageOutOfRange(usize, usize),

    /// Error serializing a run report.
    #[error("serialization error: {0}")]
    Serialize(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::Pdf(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NoTerminalMarkersFound { page: 3 };
        assert_eq!(
            err.to_string(),
            "no terminal sentence markers found on page 3"
        );

        let err = Error::PageOutOfRange(10, 5);
        assert_eq!(
            err.to_string(),
            "page index 10 is out of range (document has 5 pages)"
        );

        let err = Error::PageTimeout {
            page: 2,
            budget_ms: 500,
        };
        assert_eq!(
            err.to_string(),
            "page 2 exceeded the 500 ms processing budget"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
