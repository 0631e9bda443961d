//! Overlay construction: drawing primitives, geometry building, rendering.

mod build;
mod primitives;
mod render;

pub use build::{build_overlay, HighlightMode, LabelPlacement};
pub use primitives::{
    Color, DrawPrimitive, OverlayLayer, HIGHLIGHT_GREEN, HIGHLIGHT_RED, LABEL_COLOR,
    LABEL_FONT_SIZE, LABEL_OFFSET, LABEL_TICK_LENGTH, OUTLINE_COLOR, OUTLINE_WIDTH,
};
pub use render::{render, RenderedOverlay, LABEL_FONT_NAME};
