//! Annotation options and configuration.

use crate::overlay::{HighlightMode, LabelPlacement};

/// Options consumed at pipeline start.
///
/// Grouping thresholds are configuration rather than hardcoded constants; the
/// defaults below were chosen against representative extractor output and are
/// the values covered by the grouping tests.
#[derive(Debug, Clone)]
pub struct AnnotateOptions {
    /// Draw an outline rectangle around every word
    pub draw_word_outlines: bool,

    /// Highlight band policy
    pub highlight_mode: HighlightMode,

    /// Alternate between two colors for consecutive bands in document order.
    /// The alternation index resets per page, never per sentence.
    pub highlight_alternation: bool,

    /// Identifier label policy
    pub label_placement: LabelPlacement,

    /// Minimum vertical overlap, as a fraction of the smaller box's height,
    /// for two words to share a line (default 0.5)
    pub line_overlap_threshold: f32,

    /// Horizontal gap threshold for joining a character to a word, as a
    /// multiple of the word's average character width (default 0.5)
    pub word_gap_factor: f32,

    /// Fixed gap threshold in points while the current word has a single
    /// character (default 1.0)
    pub word_gap_min: f32,

    /// Minimum vertical overlap fraction for a character to join the current
    /// word (default 0.5)
    pub word_overlap_min: f32,

    /// Terminal markers that end a sentence when the last word of a line ends
    /// with one of them (default `.` `!` `?`)
    pub sentence_markers: Vec<String>,

    /// Fail a page with `NoTerminalMarkersFound` when it contains lines but
    /// no terminal marker anywhere; when false the page becomes one sentence
    pub strict_sentences: bool,

    /// Per-page processing budget in milliseconds (0 = unlimited)
    pub per_page_timeout_ms: u64,

    /// Process pages on a worker pool
    pub parallel: bool,
}

impl AnnotateOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable word outline rectangles.
    pub fn with_word_outlines(mut self, draw: bool) -> Self {
        self.draw_word_outlines = draw;
        self
    }

    /// Set the highlight band policy.
    pub fn with_highlight_mode(mut self, mode: HighlightMode) -> Self {
        self.highlight_mode = mode;
        self
    }

    /// Enable or disable highlight color alternation.
    pub fn with_highlight_alternation(mut self, alternate: bool) -> Self {
        self.highlight_alternation = alternate;
        self
    }

    /// Set the label placement policy.
    pub fn with_label_placement(mut self, placement: LabelPlacement) -> Self {
        self.label_placement = placement;
        self
    }

    /// Set the line grouping overlap threshold.
    pub fn with_line_overlap_threshold(mut self, threshold: f32) -> Self {
        self.line_overlap_threshold = threshold;
        self
    }

    /// Set the word gap factor.
    pub fn with_word_gap_factor(mut self, factor: f32) -> Self {
        self.word_gap_factor = factor;
        self
    }

    /// Set the sentence terminal markers.
    pub fn with_sentence_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sentence_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    /// Enable strict sentence grouping.
    pub fn strict(mut self) -> Self {
        self.strict_sentences = true;
        self
    }

    /// Set the per-page timeout in milliseconds (0 disables it).
    pub fn with_page_timeout_ms(mut self, ms: u64) -> Self {
        self.per_page_timeout_ms = ms;
        self
    }

    /// Disable parallel page processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Preset matching the original bounding-box output: outlines only.
    pub fn outlines_only() -> Self {
        Self::default()
            .with_highlight_mode(HighlightMode::None)
            .with_label_placement(LabelPlacement::None)
    }

    /// Preset matching the original highlight output: alternating per-line
    /// bands, nothing else.
    pub fn highlights_only() -> Self {
        Self::default()
            .with_word_outlines(false)
            .with_label_placement(LabelPlacement::None)
    }

    /// Preset matching the original annotation output: line labels only.
    pub fn labels_only() -> Self {
        Self::default()
            .with_word_outlines(false)
            .with_highlight_mode(HighlightMode::None)
    }
}

impl Default for AnnotateOptions {
    fn default() -> Self {
        Self {
            draw_word_outlines: true,
            highlight_mode: HighlightMode::PerLine,
            highlight_alternation: true,
            label_placement: LabelPlacement::RightOfLine,
            line_overlap_threshold: 0.5,
            word_gap_factor: 0.5,
            word_gap_min: 1.0,
            word_overlap_min: 0.5,
            sentence_markers: vec![".".into(), "!".into(), "?".into()],
            strict_sentences: false,
            per_page_timeout_ms: 0,
            parallel: true,
        }
    }
}
