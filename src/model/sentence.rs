//! Sentence units: labeled groups of consecutive lines.

use serde::{Deserialize, Serialize};

use super::Line;

/// A sentence-like block of one or more consecutive lines.
///
/// Identifiers are sequential per page (`s1`, `s2`, ...), stable within a
/// single run, and never reused on the same page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sentence {
    /// Page-scoped identifier, e.g. `"s3"`
    pub id: String,
    /// Member lines in reading order
    pub lines: Vec<Line>,
}

impl Sentence {
    /// Create a sentence with the given 1-based sequence number.
    pub fn new(number: usize, lines: Vec<Line>) -> Self {
        Self {
            id: format!("s{number}"),
            lines,
        }
    }

    /// The sentence text with lines joined by single spaces.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Result of sentence grouping for one page.
///
/// Every line the grouper received appears in exactly one sentence or in
/// `unassigned`, never both and never neither; lines are never silently
/// dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SentenceGroups {
    /// Sentences in reading order
    pub sentences: Vec<Sentence>,
    /// Lines that could not be assigned to any sentence
    pub unassigned: Vec<Line>,
}

impl SentenceGroups {
    /// Total number of lines across sentences and the unassigned set.
    pub fn line_count(&self) -> usize {
        self.sentences.iter().map(|s| s.lines.len()).sum::<usize>() + self.unassigned.len()
    }
}
