//! Geometry normalization: the single reconciliation point for coordinate
//! conventions.
//!
//! Position sources disagree about where the origin sits and which way y
//! grows. Everything downstream of this module operates only in canonical
//! bottom-left-up coordinates, so no other component branches on the source
//! convention.

use crate::error::{Error, Result};
use crate::model::{CoordOrigin, PositionRecord, Rect, RawRecord};

/// Slack, in points, allowed outside the page box before a record is
/// rejected. Absorbs rounding in extractor output.
pub const PAGE_BOUNDS_TOLERANCE: f32 = 1.0;

/// Convert one raw record into canonical coordinates and validate it.
///
/// Top-left-down sources are flipped with `y0' = H - y1`, `y1' = H - y0`;
/// bottom-left-up input passes through unchanged. Fails with
/// [`Error::InvalidGeometry`] when the box is inverted after conversion or
/// lies outside `[0, width] x [0, height]` beyond [`PAGE_BOUNDS_TOLERANCE`].
pub fn normalize(
    raw: &RawRecord,
    origin: CoordOrigin,
    page_index: usize,
    page_width: f32,
    page_height: f32,
) -> Result<PositionRecord> {
    let source = Rect::new(raw.x0, raw.y0, raw.x1, raw.y1);
    let rect = match origin {
        CoordOrigin::TopLeftDown => source.flip_y(page_height),
        CoordOrigin::BottomLeftUp => source,
    };

    if rect.x1 < rect.x0 || rect.y1 < rect.y0 {
        return Err(Error::InvalidGeometry {
            page: page_index,
            detail: format!(
                "inverted box ({}, {}, {}, {}) after conversion",
                rect.x0, rect.y0, rect.x1, rect.y1
            ),
        });
    }

    let min = -PAGE_BOUNDS_TOLERANCE;
    if rect.x0 < min
        || rect.y0 < min
        || rect.x1 > page_width + PAGE_BOUNDS_TOLERANCE
        || rect.y1 > page_height + PAGE_BOUNDS_TOLERANCE
    {
        return Err(Error::InvalidGeometry {
            page: page_index,
            detail: format!(
                "box ({}, {}, {}, {}) outside page {page_width}x{page_height}",
                rect.x0, rect.y0, rect.x1, rect.y1
            ),
        });
    }

    Ok(PositionRecord {
        text: raw.text.clone(),
        rect,
        page_index,
    })
}

/// Normalize a page's records, dropping and logging invalid ones.
///
/// A malformed record is localized damage: it is reported via `log::warn!`
/// and skipped, and the page continues with the remaining records.
pub fn normalize_page(
    records: &[RawRecord],
    origin: CoordOrigin,
    page_index: usize,
    page_width: f32,
    page_height: f32,
) -> Vec<PositionRecord> {
    records
        .iter()
        .filter_map(
            |raw| match normalize(raw, origin, page_index, page_width, page_height) {
                Ok(record) => Some(record),
                Err(err) => {
                    log::warn!("dropping record {:?}: {err}", raw.text);
                    None
                }
            },
        )
        .collect()
}
