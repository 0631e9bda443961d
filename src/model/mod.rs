//! Data model: geometry, position records, and grouping structures.

mod geometry;
mod line;
mod record;
mod sentence;

pub use geometry::{CoordOrigin, Rect};
pub use line::{Line, Word};
pub use record::{PageInput, PositionRecord, RawRecord, RecordGranularity};
pub use sentence::{Sentence, SentenceGroups};
