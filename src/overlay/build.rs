//! Overlay geometry: turning grouped sentences into drawing primitives.

use serde::{Deserialize, Serialize};

use crate::model::{Line, SentenceGroups};
use crate::overlay::primitives::{
    Color, DrawPrimitive, OverlayLayer, HIGHLIGHT_GREEN, HIGHLIGHT_RED, LABEL_COLOR,
    LABEL_FONT_SIZE, LABEL_OFFSET, OUTLINE_COLOR, OUTLINE_WIDTH,
};
use crate::pipeline::AnnotateOptions;

/// Which regions receive highlight bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightMode {
    /// No highlight bands
    None,
    /// One band per line bounding box
    #[default]
    PerLine,
    /// One band per sentence bounding box
    PerSentence,
}

/// Where identifier labels are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelPlacement {
    /// No labels
    None,
    /// At a fixed offset right of each line's bounding box, vertically
    /// centered on the line
    #[default]
    RightOfLine,
}

/// Build the overlay layer for one page from its grouped sentences.
///
/// Primitives are emitted in the layer's fixed z-order: highlights, then
/// word outlines, then labels. When alternation is on, consecutive bands in
/// document order cycle between [`HIGHLIGHT_GREEN`] and [`HIGHLIGHT_RED`];
/// the alternation index resets per page (never per sentence) so the visual
/// rhythm continues across sentence boundaries.
pub fn build_overlay(
    page_index: usize,
    page_width: f32,
    page_height: f32,
    groups: &SentenceGroups,
    options: &AnnotateOptions,
) -> OverlayLayer {
    let mut layer = OverlayLayer::empty(page_index, page_width, page_height);
    let all_lines = || {
        groups
            .sentences
            .iter()
            .flat_map(|s| s.lines.iter())
            .chain(groups.unassigned.iter())
    };

    match options.highlight_mode {
        HighlightMode::None => {}
        HighlightMode::PerLine => {
            for (band_index, line) in all_lines().enumerate() {
                layer.primitives.push(DrawPrimitive::FilledHighlight {
                    rect: line.bbox,
                    color: band_color(band_index, options.highlight_alternation),
                });
            }
        }
        HighlightMode::PerSentence => {
            let mut band_index = 0;
            for sentence in &groups.sentences {
                if sentence.lines.is_empty() {
                    continue;
                }
                let bbox = sentence
                    .lines
                    .iter()
                    .skip(1)
                    .fold(sentence.lines[0].bbox, |acc, l| acc.union(&l.bbox));
                layer.primitives.push(DrawPrimitive::FilledHighlight {
                    rect: bbox,
                    color: band_color(band_index, options.highlight_alternation),
                });
                band_index += 1;
            }
        }
    }

    if options.draw_word_outlines {
        for line in all_lines() {
            for word in &line.words {
                layer.primitives.push(DrawPrimitive::OutlineRect {
                    rect: word.bbox,
                    color: OUTLINE_COLOR,
                    line_width: OUTLINE_WIDTH,
                });
            }
        }
    }

    if options.label_placement == LabelPlacement::RightOfLine {
        for sentence in &groups.sentences {
            for (position, line) in sentence.lines.iter().enumerate() {
                let text = format!("{}_c{}", sentence.id, position + 1);
                layer.primitives.push(line_label(line, text));
            }
        }
        // Unassigned lines still get a visible marker so they are never
        // silently invisible in the output.
        for line in &groups.unassigned {
            layer.primitives.push(line_label(line, "s?_c?".to_string()));
        }
    }

    layer
}

fn band_color(band_index: usize, alternate: bool) -> Color {
    if alternate && band_index % 2 == 1 {
        HIGHLIGHT_RED
    } else {
        HIGHLIGHT_GREEN
    }
}

fn line_label(line: &Line, text: String) -> DrawPrimitive {
    let anchor = (
        line.bbox.x1 + LABEL_OFFSET,
        line.bbox.center_y() - LABEL_FONT_SIZE * 0.35,
    );
    DrawPrimitive::Label {
        anchor,
        text,
        color: LABEL_COLOR,
        font_size: LABEL_FONT_SIZE,
    }
}
