//! Word-to-line grouping.

use std::cmp::Ordering;

use crate::error::Result;
use crate::model::{Line, Word};
use crate::pipeline::{AnnotateOptions, Deadline};

/// Group a page's words into lines.
///
/// Words are visited top to bottom (bbox top descending, ties by `x0`
/// ascending) and each joins the first line whose bounding box it overlaps
/// vertically by more than `line_overlap_threshold` of the smaller height.
/// Finished lines are ordered top to bottom by their top edge, ties broken by
/// the first word's `x0`, and indexed sequentially from zero.
pub fn group_lines(
    page_index: usize,
    words: Vec<Word>,
    options: &AnnotateOptions,
    deadline: Option<&Deadline>,
) -> Result<Vec<Line>> {
    if words.is_empty() {
        return Ok(Vec::new());
    }

    let mut words = words;
    words.sort_by(|a, b| {
        b.bbox
            .y1
            .total_cmp(&a.bbox.y1)
            .then_with(|| a.bbox.x0.total_cmp(&b.bbox.x0))
    });

    let mut groups: Vec<Vec<Word>> = Vec::new();
    for word in words {
        if let Some(deadline) = deadline {
            deadline.check(page_index)?;
        }
        let slot = groups.iter_mut().find(|group| {
            let bbox = group
                .iter()
                .skip(1)
                .fold(group[0].bbox, |acc, w| acc.union(&w.bbox));
            bbox.vertical_overlap_ratio(&word.bbox) > options.line_overlap_threshold
        });
        match slot {
            Some(group) => group.push(word),
            None => groups.push(vec![word]),
        }
    }

    let mut lines: Vec<Line> = groups.into_iter().map(Line::from_words).collect();
    lines.sort_by(compare_lines);
    for (index, line) in lines.iter_mut().enumerate() {
        line.index = index;
    }

    log::debug!("page {page_index}: grouped words into {} lines", lines.len());
    Ok(lines)
}

/// Total reading order over lines: top edge descending, then first word `x0`
/// ascending. `total_cmp` keeps the order total even for degenerate floats,
/// so no two lines are incomparable; `Equal` only for coincident positions.
pub fn compare_lines(a: &Line, b: &Line) -> Ordering {
    b.bbox
        .y1
        .total_cmp(&a.bbox.y1)
        .then_with(|| a.bbox.x0.total_cmp(&b.bbox.x0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rect;

    fn word(text: &str, x0: f32, y0: f32, x1: f32, y1: f32) -> Word {
        Word::new(text, Rect::new(x0, y0, x1, y1))
    }

    #[test]
    fn test_empty_page() {
        let lines = group_lines(0, vec![], &AnnotateOptions::default(), None).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_single_line_ordering() {
        // Supplied out of reading order; grouped into one line sorted by x0.
        let words = vec![
            word("world.", 45.0, 780.0, 90.0, 800.0),
            word("Hello", 0.0, 780.0, 40.0, 800.0),
        ];
        let lines = group_lines(0, words, &AnnotateOptions::default(), None).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].index, 0);
        assert_eq!(lines[0].text(), "Hello world.");
    }

    #[test]
    fn test_two_lines_top_to_bottom() {
        let words = vec![
            word("lower", 0.0, 740.0, 40.0, 755.0),
            word("upper", 0.0, 780.0, 40.0, 800.0),
        ];
        let lines = group_lines(0, words, &AnnotateOptions::default(), None).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text(), "upper");
        assert_eq!(lines[0].index, 0);
        assert_eq!(lines[1].text(), "lower");
        assert_eq!(lines[1].index, 1);
    }

    #[test]
    fn test_partial_overlap_below_threshold_splits() {
        // 20pt-tall boxes offset by 15pt overlap by 5pt = 25% of the smaller
        // height, under the 0.5 default, so they land on separate lines.
        let words = vec![
            word("a", 0.0, 780.0, 10.0, 800.0),
            word("b", 20.0, 765.0, 30.0, 785.0),
        ];
        let lines = group_lines(0, words, &AnnotateOptions::default(), None).unwrap();
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_superscript_stays_on_line() {
        // A smaller box fully inside the line's vertical band joins it.
        let words = vec![
            word("base", 0.0, 780.0, 40.0, 800.0),
            word("2", 41.0, 790.0, 46.0, 799.0),
        ];
        let lines = group_lines(0, words, &AnnotateOptions::default(), None).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), "base 2");
    }

    #[test]
    fn test_ordering_totality() {
        let lines: Vec<Line> = [
            (780.0, 0.0),
            (780.0, 50.0),
            (740.0, 0.0),
            (780.0, 0.0),
        ]
        .iter()
        .map(|&(y, x)| Line::from_words(vec![word("w", x, y, x + 10.0, y + 20.0)]))
        .collect();

        for a in &lines {
            for b in &lines {
                let ab = compare_lines(a, b);
                let ba = compare_lines(b, a);
                assert_eq!(ab, ba.reverse());
                if ab == Ordering::Equal {
                    assert_eq!(a.bbox.y1, b.bbox.y1);
                    assert_eq!(a.bbox.x0, b.bbox.x0);
                }
            }
        }
    }

    #[test]
    fn test_tie_broken_by_x0() {
        let left = Line::from_words(vec![word("l", 0.0, 780.0, 10.0, 800.0)]);
        let right = Line::from_words(vec![word("r", 50.0, 780.0, 60.0, 800.0)]);
        assert_eq!(compare_lines(&left, &right), Ordering::Less);
    }
}
