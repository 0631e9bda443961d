//! # overpdf
//!
//! Text-geometry reconciliation and overlay compositing for PDF pages.
//!
//! Given per-page word or character position records (supplied by whatever
//! extraction library the caller uses), overpdf normalizes them into one
//! canonical coordinate space, groups them into words, lines, and
//! sentence-like units, builds annotation overlays (word outline boxes,
//! alternating highlight bands, per-line identifier labels), and composites
//! each overlay onto the original page as an independent content layer. The
//! original page content is never rewritten.
//!
//! ## Quick Start
//!
//! ```no_run
//! use overpdf::{annotate_bytes, AnnotateOptions, PageInput, RawRecord};
//!
//! fn main() -> overpdf::Result<()> {
//!     let pdf = std::fs::read("document.pdf")?;
//!     let pages = vec![PageInput::words(
//!         0,
//!         595.0,
//!         842.0,
//!         vec![
//!             RawRecord::new("Hello", 0.0, 780.0, 40.0, 800.0),
//!             RawRecord::new("world.", 45.0, 780.0, 90.0, 800.0),
//!         ],
//!     )];
//!
//!     let outcome = annotate_bytes(&pdf, &pages, &AnnotateOptions::default())?;
//!     std::fs::write("annotated.pdf", &outcome.output)?;
//!     println!("{}", outcome.report.to_json_pretty()?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Coordinate reconciliation**: one normalizer handles top-left-down and
//!   bottom-left-up sources; everything else runs in canonical coordinates
//! - **Word assembly**: character-level sources are grouped into words by
//!   gap and overlap heuristics; word-level sources bypass the policy
//! - **Deterministic grouping**: total line ordering, page-scoped sentence
//!   identifiers (`s1`, `s2`, ...)
//! - **Self-contained overlays**: rendered layers carry their own fonts and
//!   opacity states and composite onto any page of matching size
//! - **Page-scoped failures**: a bad page is reported and skipped, never
//!   aborting the batch

pub mod compose;
pub mod error;
pub mod model;
pub mod overlay;
pub mod pipeline;
pub mod report;

pub use error::{Error, Result};
pub use model::{
    CoordOrigin, Line, PageInput, PositionRecord, RawRecord, RecordGranularity, Rect, Sentence,
    SentenceGroups, Word,
};
pub use overlay::{
    build_overlay, Color, DrawPrimitive, HighlightMode, LabelPlacement, OverlayLayer,
    RenderedOverlay,
};
pub use pipeline::{AnnotateOptions, Deadline};
pub use report::{FailureKind, PageFailure, RunReport};

use lopdf::Document;

/// Result of an annotation run: the serialized document plus the per-page
/// report.
pub struct AnnotateOutcome {
    /// The output PDF bytes, original content plus composited overlays
    pub output: Vec<u8>,
    /// Which pages composited and which failed
    pub report: RunReport,
}

/// Annotate a PDF held in memory.
///
/// `pages` supplies the position records for each page to annotate; pages of
/// the document without a corresponding [`PageInput`] pass through untouched.
/// Failures are page-scoped and collected in the returned report.
pub fn annotate_bytes(
    pdf: &[u8],
    pages: &[PageInput],
    options: &AnnotateOptions,
) -> Result<AnnotateOutcome> {
    let mut doc = Document::load_mem(pdf)?;
    let report = pipeline::run(&mut doc, pages, options);
    let mut output = Vec::new();
    doc.save_to(&mut output)?;
    Ok(AnnotateOutcome { output, report })
}

/// Annotate a PDF file and return the output bytes and report.
pub fn annotate_file<P: AsRef<std::path::Path>>(
    path: P,
    pages: &[PageInput],
    options: &AnnotateOptions,
) -> Result<AnnotateOutcome> {
    let pdf = std::fs::read(path)?;
    annotate_bytes(&pdf, pages, options)
}

/// Builder for annotation runs.
///
/// # Example
///
/// ```no_run
/// use overpdf::{Overpdf, HighlightMode, PageInput};
///
/// let pages: Vec<PageInput> = vec![];
/// let outcome = Overpdf::new()
///     .highlight_mode(HighlightMode::PerSentence)
///     .strict_sentences()
///     .page_timeout_ms(1000)
///     .annotate_bytes(b"%PDF-...", &pages)?;
/// # Ok::<(), overpdf::Error>(())
/// ```
pub struct Overpdf {
    options: AnnotateOptions,
}

impl Overpdf {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            options: AnnotateOptions::default(),
        }
    }

    /// Enable or disable word outline rectangles.
    pub fn word_outlines(mut self, draw: bool) -> Self {
        self.options = self.options.with_word_outlines(draw);
        self
    }

    /// Set the highlight band policy.
    pub fn highlight_mode(mut self, mode: HighlightMode) -> Self {
        self.options = self.options.with_highlight_mode(mode);
        self
    }

    /// Enable or disable alternating highlight colors.
    pub fn highlight_alternation(mut self, alternate: bool) -> Self {
        self.options = self.options.with_highlight_alternation(alternate);
        self
    }

    /// Set the label placement policy.
    pub fn label_placement(mut self, placement: LabelPlacement) -> Self {
        self.options = self.options.with_label_placement(placement);
        self
    }

    /// Set the sentence terminal markers.
    pub fn sentence_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = self.options.with_sentence_markers(markers);
        self
    }

    /// Fail pages that contain no terminal markers.
    pub fn strict_sentences(mut self) -> Self {
        self.options = self.options.strict();
        self
    }

    /// Set the per-page processing budget in milliseconds.
    pub fn page_timeout_ms(mut self, ms: u64) -> Self {
        self.options = self.options.with_page_timeout_ms(ms);
        self
    }

    /// Process pages sequentially instead of on the worker pool.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// The accumulated options.
    pub fn options(&self) -> &AnnotateOptions {
        &self.options
    }

    /// Annotate a PDF held in memory.
    pub fn annotate_bytes(self, pdf: &[u8], pages: &[PageInput]) -> Result<AnnotateOutcome> {
        annotate_bytes(pdf, pages, &self.options)
    }

    /// Annotate a PDF file.
    pub fn annotate_file<P: AsRef<std::path::Path>>(
        self,
        path: P,
        pages: &[PageInput],
    ) -> Result<AnnotateOutcome> {
        annotate_file(path, pages, &self.options)
    }
}

impl Default for Overpdf {
    fn default() -> Self {
        Self::new()
    }
}
