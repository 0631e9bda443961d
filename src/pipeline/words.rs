//! Character-to-word assembly.
//!
//! Only needed when the position source yields character boxes. Word-level
//! sources bypass this policy entirely via [`pass_through_words`], so the
//! grouping heuristics live in exactly one place.

use crate::error::Result;
use crate::model::{PositionRecord, Word};
use crate::pipeline::{AnnotateOptions, Deadline};

/// Group consecutive character records into words.
///
/// A character joins the current word while the horizontal gap from the
/// word's right edge stays below threshold and the character's box overlaps
/// the word's box vertically by at least `word_overlap_min`. The threshold is
/// `word_gap_min` points while the word holds a single character, then
/// `word_gap_factor` times the word's average character width. A
/// whitespace-only record closes the current word and is discarded. Zero
/// input records yield an empty sequence, not an error.
pub fn assemble_words(
    records: &[PositionRecord],
    options: &AnnotateOptions,
    deadline: Option<&Deadline>,
) -> Result<Vec<Word>> {
    let mut words: Vec<Word> = Vec::new();
    let mut current: Option<WordInProgress> = None;

    for record in records {
        if let Some(deadline) = deadline {
            deadline.check(record.page_index)?;
        }

        if record.text.chars().all(char::is_whitespace) {
            if let Some(w) = current.take() {
                words.push(w.finish());
            }
            continue;
        }

        let joins = current
            .as_ref()
            .is_some_and(|word| word.accepts(record, options));
        if joins {
            if let Some(word) = current.as_mut() {
                word.push(record);
            }
        } else {
            if let Some(w) = current.take() {
                words.push(w.finish());
            }
            current = Some(WordInProgress::start(record));
        }
    }

    if let Some(w) = current.take() {
        words.push(w.finish());
    }

    Ok(words)
}

/// Adapter for word-level sources: every non-whitespace record becomes one
/// word unchanged, whitespace-only records are discarded.
pub fn pass_through_words(records: &[PositionRecord]) -> Vec<Word> {
    records
        .iter()
        .filter(|r| !r.text.chars().all(char::is_whitespace))
        .map(|r| Word::new(r.text.clone(), r.rect))
        .collect()
}

struct WordInProgress {
    text: String,
    bbox: crate::model::Rect,
    char_count: usize,
}

impl WordInProgress {
    fn start(record: &PositionRecord) -> Self {
        Self {
            text: record.text.clone(),
            bbox: record.rect,
            char_count: record.text.chars().count().max(1),
        }
    }

    fn accepts(&self, record: &PositionRecord, options: &AnnotateOptions) -> bool {
        let gap = record.rect.x0 - self.bbox.x1;
        let threshold = if self.char_count == 1 {
            options.word_gap_min
        } else {
            let avg_char_width = self.bbox.width() / self.char_count as f32;
            avg_char_width * options.word_gap_factor
        };
        if gap > threshold {
            return false;
        }
        self.bbox.vertical_overlap_ratio(&record.rect) >= options.word_overlap_min
    }

    fn push(&mut self, record: &PositionRecord) {
        self.text.push_str(&record.text);
        self.bbox = self.bbox.union(&record.rect);
        self.char_count += record.text.chars().count().max(1);
    }

    fn finish(self) -> Word {
        Word::new(self.text, self.bbox)
    }
}
