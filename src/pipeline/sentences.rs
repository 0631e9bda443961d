//! Line-to-sentence grouping.

use crate::error::{Error, Result};
use crate::model::{Line, Sentence, SentenceGroups};
use crate::pipeline::AnnotateOptions;

/// Closing punctuation that may trail a terminal marker without hiding it,
/// e.g. `He said "stop."` or `(done.)`.
const CLOSING_PUNCTUATION: &[char] = &['"', '\'', ')', ']', '}', '\u{201D}', '\u{2019}', '\u{00BB}'];

/// Group a page's lines into sentence units with page-scoped identifiers.
///
/// A sentence boundary falls after a line whose last word ends with one of
/// the configured terminal markers, ignoring trailing closing punctuation. A
/// page that ends mid-sentence closes its final sentence at end of page. In
/// strict mode a non-empty page with no marker anywhere fails with
/// [`Error::NoTerminalMarkersFound`]; otherwise the whole page becomes one
/// sentence.
pub fn group_sentences(
    page_index: usize,
    lines: Vec<Line>,
    options: &AnnotateOptions,
) -> Result<SentenceGroups> {
    if lines.is_empty() {
        return Ok(SentenceGroups::default());
    }

    if options.strict_sentences {
        let any_marker = lines
            .iter()
            .any(|line| line_ends_sentence(line, &options.sentence_markers));
        if !any_marker {
            return Err(Error::NoTerminalMarkersFound { page: page_index });
        }
    }

    let mut groups = SentenceGroups::default();
    let mut pending: Vec<Line> = Vec::new();
    let mut next_number = 1;

    for line in lines {
        let is_boundary = line_ends_sentence(&line, &options.sentence_markers);
        pending.push(line);
        if is_boundary {
            groups.sentences.push(Sentence::new(next_number, std::mem::take(&mut pending)));
            next_number += 1;
        }
    }

    // End of page closes the trailing sentence even without a marker.
    if !pending.is_empty() {
        groups.sentences.push(Sentence::new(next_number, pending));
    }

    log::debug!(
        "page {page_index}: {} sentences, {} unassigned lines",
        groups.sentences.len(),
        groups.unassigned.len()
    );
    Ok(groups)
}

/// Whether a line's last word ends with a terminal marker, after stripping
/// trailing closing punctuation.
fn line_ends_sentence(line: &Line, markers: &[String]) -> bool {
    let Some(word) = line.last_word() else {
        return false;
    };
    let trimmed = word.text.trim_end_matches(CLOSING_PUNCTUATION);
    markers.iter().any(|m| !m.is_empty() && trimmed.ends_with(m.as_str()))
}
