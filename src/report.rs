//! Run reporting: which pages composited, which failed and why.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Category of a page-scoped failure, mirroring the error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Malformed geometry that could not be localized to single records
    InvalidGeometry,
    /// Strict-mode sentence grouping found no terminal markers
    NoTerminalMarkersFound,
    /// Overlay and page dimensions disagreed
    PageMismatch,
    /// Per-page processing budget exceeded
    PageTimeout,
    /// The document has no page at the requested index
    PageOutOfRange,
    /// Anything else (I/O, PDF structure)
    Other,
}

impl From<&Error> for FailureKind {
    fn from(err: &Error) -> Self {
        match err {
            Error::InvalidGeometry { .. } => FailureKind::InvalidGeometry,
            Error::NoTerminalMarkersFound { .. } => FailureKind::NoTerminalMarkersFound,
            Error::PageMismatch { .. } => FailureKind::PageMismatch,
            Error::PageTimeout { .. } => FailureKind::PageTimeout,
            Error::PageOutOfRange(..) => FailureKind::PageOutOfRange,
            Error::Io(_) | Error::Pdf(_) | Error::Serialize(_) => FailureKind::Other,
        }
    }
}

/// One failed page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageFailure {
    /// Zero-based page index
    pub page_index: usize,
    /// Failure category
    pub kind: FailureKind,
    /// Human-readable detail from the underlying error
    pub detail: String,
}

/// Outcome of an annotation run.
///
/// Every input page lands in exactly one of the two lists; no failure is
/// swallowed without appearing here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    /// Indices of pages whose overlays composited successfully
    pub composited: Vec<usize>,
    /// Pages excluded from successful output, with the reason
    pub failures: Vec<PageFailure>,
}

impl RunReport {
    /// Record a successfully composited page.
    pub fn record_success(&mut self, page_index: usize) {
        self.composited.push(page_index);
    }

    /// Record a failed page.
    pub fn record_failure(&mut self, page_index: usize, err: &Error) {
        self.failures.push(PageFailure {
            page_index,
            kind: FailureKind::from(err),
            detail: err.to_string(),
        });
    }

    /// Whether every page composited.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Serialize the report as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialize(e.to_string()))
    }

    /// Serialize the report as compact JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::Serialize(e.to_string()))
    }
}
