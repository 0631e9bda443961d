//! Overlay rendering: primitives to a self-contained PDF content layer.
//!
//! The rendered layer carries its own resource dictionary (a label font and
//! opacity graphics states under `/Ov*` names) and references nothing from
//! the page it will be composited onto, so it can be merged onto any page of
//! matching dimensions.

use std::collections::BTreeMap;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Object};

use crate::error::Result;
use crate::overlay::primitives::{Color, DrawPrimitive, OverlayLayer, LABEL_OFFSET, LABEL_TICK_LENGTH};

/// Resource name of the label font within the overlay's dictionary.
pub const LABEL_FONT_NAME: &str = "OvF1";

/// An overlay layer rendered to PDF drawing operators.
#[derive(Debug, Clone)]
pub struct RenderedOverlay {
    /// Zero-based page index the layer targets
    pub page_index: usize,
    /// Target page width in points
    pub width: f32,
    /// Target page height in points
    pub height: f32,
    /// Encoded content stream; empty when the layer drew nothing
    pub content: Vec<u8>,
    /// Self-contained resources (`Font`, `ExtGState`) the stream refers to
    pub resources: Dictionary,
}

impl RenderedOverlay {
    /// Whether the overlay draws nothing and compositing can skip the page.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Render an overlay layer into drawing operators and resources.
///
/// Each primitive is bracketed in `q`/`Q` so graphics state (colors, line
/// widths, opacity) never leaks between primitives or into the page content
/// the layer is later composited with.
pub fn render(layer: &OverlayLayer) -> Result<RenderedOverlay> {
    if layer.is_empty() {
        return Ok(RenderedOverlay {
            page_index: layer.page_index,
            width: layer.width,
            height: layer.height,
            content: Vec::new(),
            resources: Dictionary::new(),
        });
    }

    let mut ops: Vec<Operation> = Vec::new();
    let mut gs = GraphicsStates::default();
    let mut uses_font = false;

    for primitive in &layer.primitives {
        ops.push(Operation::new("q", vec![]));
        match primitive {
            DrawPrimitive::FilledHighlight { rect, color } => {
                if let Some(name) = gs.state_for(color) {
                    ops.push(Operation::new("gs", vec![Object::Name(name.into_bytes())]));
                }
                ops.push(Operation::new(
                    "rg",
                    vec![color.r.into(), color.g.into(), color.b.into()],
                ));
                ops.push(rect_op(rect.x0, rect.y0, rect.width(), rect.height()));
                ops.push(Operation::new("f", vec![]));
            }
            DrawPrimitive::OutlineRect {
                rect,
                color,
                line_width,
            } => {
                if let Some(name) = gs.state_for(color) {
                    ops.push(Operation::new("gs", vec![Object::Name(name.into_bytes())]));
                }
                ops.push(Operation::new(
                    "RG",
                    vec![color.r.into(), color.g.into(), color.b.into()],
                ));
                ops.push(Operation::new("w", vec![(*line_width).into()]));
                ops.push(rect_op(rect.x0, rect.y0, rect.width(), rect.height()));
                ops.push(Operation::new("S", vec![]));
            }
            DrawPrimitive::Label {
                anchor,
                text,
                color,
                font_size,
            } => {
                uses_font = true;
                let (x, y) = *anchor;
                // Leader tick from the line edge toward the label.
                ops.push(Operation::new(
                    "RG",
                    vec![color.r.into(), color.g.into(), color.b.into()],
                ));
                ops.push(Operation::new("w", vec![0.5_f32.into()]));
                ops.push(Operation::new("m", vec![(x - LABEL_OFFSET).into(), y.into()]));
                ops.push(Operation::new(
                    "l",
                    vec![(x - LABEL_OFFSET + LABEL_TICK_LENGTH).into(), y.into()],
                ));
                ops.push(Operation::new("S", vec![]));

                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new(
                    "Tf",
                    vec![
                        Object::Name(LABEL_FONT_NAME.as_bytes().to_vec()),
                        (*font_size).into(),
                    ],
                ));
                ops.push(Operation::new(
                    "rg",
                    vec![color.r.into(), color.g.into(), color.b.into()],
                ));
                ops.push(Operation::new("Td", vec![x.into(), y.into()]));
                ops.push(Operation::new("Tj", vec![Object::string_literal(text.as_str())]));
                ops.push(Operation::new("ET", vec![]));
            }
        }
        ops.push(Operation::new("Q", vec![]));
    }

    let content = Content { operations: ops }.encode()?;

    let mut resources = Dictionary::new();
    if uses_font {
        let fonts = dictionary! {
            LABEL_FONT_NAME => dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => "Helvetica",
            },
        };
        resources.set("Font", Object::Dictionary(fonts));
    }
    if !gs.states.is_empty() {
        let mut ext = Dictionary::new();
        for (alpha_bits, name) in &gs.states {
            let alpha = f32::from_bits(*alpha_bits);
            ext.set(
                name.as_str(),
                Object::Dictionary(dictionary! {
                    "Type" => "ExtGState",
                    "ca" => alpha,
                    "CA" => alpha,
                }),
            );
        }
        resources.set("ExtGState", Object::Dictionary(ext));
    }

    Ok(RenderedOverlay {
        page_index: layer.page_index,
        width: layer.width,
        height: layer.height,
        content,
        resources,
    })
}

fn rect_op(x: f32, y: f32, w: f32, h: f32) -> Operation {
    Operation::new("re", vec![x.into(), y.into(), w.into(), h.into()])
}

/// Deduplicated opacity graphics states, keyed by the alpha's bit pattern so
/// equal alphas share one `/OvGs{n}` entry.
#[derive(Default)]
struct GraphicsStates {
    states: BTreeMap<u32, String>,
}

impl GraphicsStates {
    fn state_for(&mut self, color: &Color) -> Option<String> {
        if !color.is_translucent() {
            return None;
        }
        let next_index = self.states.len();
        Some(
            self.states
                .entry(color.a.to_bits())
                .or_insert_with(|| format!("OvGs{next_index}"))
                .clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rect;
    use crate::overlay::primitives::{HIGHLIGHT_GREEN, HIGHLIGHT_RED, LABEL_COLOR, OUTLINE_COLOR};

    fn decode(content: &[u8]) -> Vec<String> {
        Content::decode(content)
            .unwrap()
            .operations
            .into_iter()
            .map(|op| op.operator)
            .collect()
    }

    #[test]
    fn test_empty_layer_renders_empty() {
        let layer = OverlayLayer::empty(0, 595.0, 842.0);
        let rendered = render(&layer).unwrap();
        assert!(rendered.is_empty());
        assert_eq!(rendered.resources.len(), 0);
    }

    #[test]
    fn test_outline_operators() {
        let mut layer = OverlayLayer::empty(0, 595.0, 842.0);
        layer.primitives.push(DrawPrimitive::OutlineRect {
            rect: Rect::new(0.0, 780.0, 40.0, 800.0),
            color: OUTLINE_COLOR,
            line_width: 0.9,
        });
        let rendered = render(&layer).unwrap();
        let ops = decode(&rendered.content);
        assert_eq!(ops, vec!["q", "RG", "w", "re", "S", "Q"]);
        // Opaque stroke needs no ExtGState and no font.
        assert!(!rendered.resources.has(b"ExtGState"));
        assert!(!rendered.resources.has(b"Font"));
    }

    #[test]
    fn test_highlight_gets_opacity_state() {
        let mut layer = OverlayLayer::empty(0, 595.0, 842.0);
        layer.primitives.push(DrawPrimitive::FilledHighlight {
            rect: Rect::new(0.0, 780.0, 90.0, 800.0),
            color: HIGHLIGHT_GREEN,
        });
        let rendered = render(&layer).unwrap();
        let ops = decode(&rendered.content);
        assert_eq!(ops, vec!["q", "gs", "rg", "re", "f", "Q"]);
        assert!(rendered.resources.has(b"ExtGState"));
    }

    #[test]
    fn test_equal_alphas_share_state() {
        let mut layer = OverlayLayer::empty(0, 595.0, 842.0);
        for color in [HIGHLIGHT_GREEN, HIGHLIGHT_RED, HIGHLIGHT_GREEN] {
            layer.primitives.push(DrawPrimitive::FilledHighlight {
                rect: Rect::new(0.0, 0.0, 10.0, 10.0),
                color,
            });
        }
        let rendered = render(&layer).unwrap();
        let ext = rendered
            .resources
            .get(b"ExtGState")
            .and_then(|o| o.as_dict())
            .unwrap();
        // Both palette colors share alpha 0.35, so one state suffices.
        assert_eq!(ext.len(), 1);
    }

    #[test]
    fn test_label_carries_font_resource() {
        let mut layer = OverlayLayer::empty(0, 595.0, 842.0);
        layer.primitives.push(DrawPrimitive::Label {
            anchor: (94.0, 785.0),
            text: "s1_c1".to_string(),
            color: LABEL_COLOR,
            font_size: 8.0,
        });
        let rendered = render(&layer).unwrap();
        let ops = decode(&rendered.content);
        assert!(ops.contains(&"BT".to_string()));
        assert!(ops.contains(&"Tj".to_string()));
        let fonts = rendered
            .resources
            .get(b"Font")
            .and_then(|o| o.as_dict())
            .unwrap();
        assert!(fonts.has(LABEL_FONT_NAME.as_bytes()));
    }
}
