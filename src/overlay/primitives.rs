//! Drawing primitives that make up an overlay layer.

use serde::{Deserialize, Serialize};

use crate::model::Rect;

/// An RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Opacity; 1.0 is fully opaque.
    pub a: f32,
}

impl Color {
    /// Fully opaque color.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Color with explicit opacity.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Whether the color needs an opacity graphics state when drawn.
    pub fn is_translucent(&self) -> bool {
        self.a < 1.0
    }
}

/// Stroke color for word outline rectangles.
pub const OUTLINE_COLOR: Color = Color::rgb(1.0, 0.85, 0.1);
/// Stroke width for word outlines, in points.
pub const OUTLINE_WIDTH: f32 = 0.9;
/// First color of the alternating highlight palette.
pub const HIGHLIGHT_GREEN: Color = Color::rgba(0.0, 1.0, 0.0, 0.35);
/// Second color of the alternating highlight palette.
pub const HIGHLIGHT_RED: Color = Color::rgba(1.0, 0.0, 0.0, 0.35);
/// Fill color for identifier labels.
pub const LABEL_COLOR: Color = Color::rgb(0.2, 0.2, 0.2);
/// Label font size in points.
pub const LABEL_FONT_SIZE: f32 = 8.0;
/// Horizontal gap between a line's right edge and its label, in points.
pub const LABEL_OFFSET: f32 = 4.0;
/// Length of the leader tick from the line edge toward the label, in points.
pub const LABEL_TICK_LENGTH: f32 = 2.0;

/// A single drawing instruction in canonical page coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawPrimitive {
    /// A stroked, unfilled rectangle.
    OutlineRect {
        rect: Rect,
        color: Color,
        line_width: f32,
    },
    /// A filled rectangle, typically translucent.
    FilledHighlight { rect: Rect, color: Color },
    /// Identifier text anchored at a point, with a short leader tick drawn
    /// from the anchored line's edge.
    Label {
        /// Baseline origin of the label text
        anchor: (f32, f32),
        text: String,
        color: Color,
        font_size: f32,
    },
}

/// Ordered drawing primitives for one page.
///
/// Rendering order is fixed bottom-to-top: highlight fills first, then word
/// outlines, then labels, so outlines and text stay visible over the
/// translucent bands. The builder emits primitives already in that order and
/// the renderer draws them as given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayLayer {
    /// Zero-based page index this layer belongs to
    pub page_index: usize,
    /// Target page width in points
    pub width: f32,
    /// Target page height in points
    pub height: f32,
    /// Primitives in drawing order
    pub primitives: Vec<DrawPrimitive>,
}

impl OverlayLayer {
    /// Create an empty layer for a page.
    pub fn empty(page_index: usize, width: f32, height: f32) -> Self {
        Self {
            page_index,
            width,
            height,
            primitives: Vec::new(),
        }
    }

    /// Whether the layer draws nothing.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translucency() {
        assert!(HIGHLIGHT_GREEN.is_translucent());
        assert!(!OUTLINE_COLOR.is_translucent());
    }

    #[test]
    fn test_empty_layer() {
        let layer = OverlayLayer::empty(0, 595.0, 842.0);
        assert!(layer.is_empty());
        assert_eq!(layer.page_index, 0);
    }
}
