//! Input boundary types: raw records from the position source and their
//! normalized form.

use serde::{Deserialize, Serialize};

use super::{CoordOrigin, Rect};

/// A position record exactly as supplied by the source library, in the
/// source's own coordinate convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    /// Text content: a whole word or a single character depending on the
    /// source granularity.
    pub text: String,
    /// Left edge in source coordinates
    pub x0: f32,
    /// One vertical edge in source coordinates (meaning depends on origin)
    pub y0: f32,
    /// Right edge in source coordinates
    pub x1: f32,
    /// The other vertical edge in source coordinates
    pub y1: f32,
}

impl RawRecord {
    /// Create a raw record.
    pub fn new(text: impl Into<String>, x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            text: text.into(),
            x0,
            y0,
            x1,
            y1,
        }
    }
}

/// A position record in canonical coordinates. Immutable once normalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionRecord {
    /// Text content of the record
    pub text: String,
    /// Bounding box in canonical coordinates
    pub rect: Rect,
    /// Zero-based page index the record belongs to
    pub page_index: usize,
}

/// Granularity of the records a source supplies for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordGranularity {
    /// One record per extracted word; the word assembler passes these through.
    #[default]
    Words,
    /// One record per character; the word assembler groups them into words.
    Characters,
}

/// One page's worth of raw position data, tagged with everything the
/// normalizer needs to reconcile it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInput {
    /// Zero-based page index in the source document
    pub index: usize,
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
    /// Coordinate convention of `records`
    pub origin: CoordOrigin,
    /// Whether `records` are words or characters
    pub granularity: RecordGranularity,
    /// Raw position records in reading order as supplied by the source
    pub records: Vec<RawRecord>,
}

impl PageInput {
    /// Create a page input with word-level records in canonical coordinates.
    pub fn words(index: usize, width: f32, height: f32, records: Vec<RawRecord>) -> Self {
        Self {
            index,
            width,
            height,
            origin: CoordOrigin::BottomLeftUp,
            granularity: RecordGranularity::Words,
            records,
        }
    }

    /// Create a page input with character-level records.
    pub fn characters(
        index: usize,
        width: f32,
        height: f32,
        origin: CoordOrigin,
        records: Vec<RawRecord>,
    ) -> Self {
        Self {
            index,
            width,
            height,
            origin,
            granularity: RecordGranularity::Characters,
            records,
        }
    }

    /// Set the coordinate convention.
    pub fn with_origin(mut self, origin: CoordOrigin) -> Self {
        self.origin = origin;
        self
    }
}
