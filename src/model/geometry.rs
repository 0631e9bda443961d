//! Geometry primitives in canonical page coordinates.
//!
//! Canonical coordinates have their origin at the bottom-left corner of the
//! page with y increasing upward, measured in page points (1/72 inch). Every
//! component past the normalizer operates exclusively in this space.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in canonical page coordinates.
///
/// Once validated by the normalizer, `x0 <= x1` and `y0 <= y1` hold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x0: f32,
    /// Bottom edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Top edge
    pub y1: f32,
}

impl Rect {
    /// Create a rectangle from its corner coordinates.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Vertical midpoint.
    pub fn center_y(&self) -> f32 {
        (self.y0 + self.y1) / 2.0
    }

    /// The smallest rectangle containing both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Vertical extent shared with `other`, in points. Zero when disjoint.
    pub fn vertical_overlap(&self, other: &Rect) -> f32 {
        (self.y1.min(other.y1) - self.y0.max(other.y0)).max(0.0)
    }

    /// Vertical overlap as a fraction of the smaller rectangle's height.
    ///
    /// Returns 0.0 when either rectangle has zero height.
    pub fn vertical_overlap_ratio(&self, other: &Rect) -> f32 {
        let smaller = self.height().min(other.height());
        if smaller <= 0.0 {
            return 0.0;
        }
        self.vertical_overlap(other) / smaller
    }

    /// Mirror the rectangle vertically across a page of the given height.
    ///
    /// Converts between top-left-down and bottom-left-up conventions; applying
    /// it twice restores the original rectangle.
    pub fn flip_y(&self, page_height: f32) -> Rect {
        Rect {
            x0: self.x0,
            y0: page_height - self.y1,
            x1: self.x1,
            y1: page_height - self.y0,
        }
    }
}

/// Coordinate convention declared by the position source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordOrigin {
    /// Origin at the top-left corner, y increasing downward (e.g. raster-style
    /// extractors).
    TopLeftDown,
    /// Origin at the bottom-left corner, y increasing upward (native PDF user
    /// space). Already canonical.
    #[default]
    BottomLeftUp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, -2.0, 20.0, 8.0);
        let u = a.union(&b);
        assert_eq!(u, Rect::new(0.0, -2.0, 20.0, 10.0));
    }

    #[test]
    fn test_vertical_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(0.0, 5.0, 10.0, 15.0);
        assert_eq!(a.vertical_overlap(&b), 5.0);
        assert_eq!(a.vertical_overlap_ratio(&b), 0.5);

        let disjoint = Rect::new(0.0, 20.0, 10.0, 30.0);
        assert_eq!(a.vertical_overlap(&disjoint), 0.0);
    }

    #[test]
    fn test_overlap_ratio_zero_height() {
        let a = Rect::new(0.0, 5.0, 10.0, 5.0);
        let b = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(a.vertical_overlap_ratio(&b), 0.0);
    }

    #[test]
    fn test_flip_y_round_trip() {
        let r = Rect::new(10.0, 700.0, 90.0, 720.0);
        let flipped = r.flip_y(842.0);
        assert_eq!(flipped, Rect::new(10.0, 122.0, 90.0, 142.0));
        assert_eq!(flipped.flip_y(842.0), r);
    }
}
