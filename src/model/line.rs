//! Word and line types produced by the grouping stages.

use serde::{Deserialize, Serialize};

use super::Rect;

/// A contiguous lexical unit with its bounding box.
///
/// The text is never empty; whitespace-only records are discarded before a
/// word is formed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word {
    /// The word text
    pub text: String,
    /// Bounding box in canonical coordinates
    pub bbox: Rect,
}

impl Word {
    /// Create a word from text and bounding box.
    pub fn new(text: impl Into<String>, bbox: Rect) -> Self {
        Self {
            text: text.into(),
            bbox,
        }
    }
}

/// A horizontal run of words sharing a baseline region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    /// Zero-based sequential index within the page, in reading order
    pub index: usize,
    /// Member words, ordered left to right by `x0`
    pub words: Vec<Word>,
    /// Union of the member word boxes
    pub bbox: Rect,
}

impl Line {
    /// Build a line from words, sorting them left to right and deriving the
    /// bounding box. The index is assigned by the line grouper afterwards.
    ///
    /// # Panics
    ///
    /// Panics when `words` is empty; a line always has at least one word.
    pub fn from_words(mut words: Vec<Word>) -> Self {
        assert!(!words.is_empty(), "a line requires at least one word");
        words.sort_by(|a, b| a.bbox.x0.total_cmp(&b.bbox.x0));
        let bbox = words
            .iter()
            .skip(1)
            .fold(words[0].bbox, |acc, w| acc.union(&w.bbox));
        Self {
            index: 0,
            words,
            bbox,
        }
    }

    /// The line's text with single spaces between words.
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Number of words in the line.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// The last word of the line, used for sentence boundary detection.
    pub fn last_word(&self) -> Option<&Word> {
        self.words.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_words_sorts_and_unions() {
        let line = Line::from_words(vec![
            Word::new("world", Rect::new(45.0, 780.0, 90.0, 800.0)),
            Word::new("Hello", Rect::new(0.0, 780.0, 40.0, 800.0)),
        ]);
        assert_eq!(line.text(), "Hello world");
        assert_eq!(line.bbox, Rect::new(0.0, 780.0, 90.0, 800.0));
        assert_eq!(line.last_word().unwrap().text, "world");
    }

    #[test]
    #[should_panic(expected = "at least one word")]
    fn test_from_words_rejects_empty() {
        Line::from_words(vec![]);
    }
}
