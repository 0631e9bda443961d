//! Per-page processing pipeline and the multi-page runner.
//!
//! Pages are independent: lines and sentences never span page boundaries, so
//! each page runs normalize → assemble → group → build → render on its own.
//! Workers return rendered overlays tagged by page index over a channel and a
//! single collector composites them into the document in ascending page
//! order. Every failure is page-scoped; one bad page never aborts the batch.

mod lines;
mod normalize;
mod options;
mod sentences;
mod words;

pub use lines::{compare_lines, group_lines};
pub use normalize::{normalize, normalize_page, PAGE_BOUNDS_TOLERANCE};
pub use options::AnnotateOptions;
pub use sentences::group_sentences;
pub use words::{assemble_words, pass_through_words};

use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::compose;
use crate::error::{Error, Result};
use crate::model::{PageInput, RecordGranularity, SentenceGroups, Word};
use crate::overlay::{self, OverlayLayer, RenderedOverlay};
use crate::report::RunReport;

/// Cooperative per-page processing budget.
///
/// Grouping loops call [`Deadline::check`] so a pathological page (degenerate
/// geometry producing an enormous number of candidate groups) fails with
/// [`Error::PageTimeout`] instead of stalling its worker.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    budget: Duration,
    budget_ms: u64,
}

impl Deadline {
    /// Start a deadline for the given budget; `None` when `budget_ms` is 0.
    pub fn start(budget_ms: u64) -> Option<Self> {
        (budget_ms > 0).then(|| Self {
            started: Instant::now(),
            budget: Duration::from_millis(budget_ms),
            budget_ms,
        })
    }

    /// Fail with [`Error::PageTimeout`] once the budget is exhausted.
    pub fn check(&self, page_index: usize) -> Result<()> {
        if self.started.elapsed() > self.budget {
            Err(Error::PageTimeout {
                page: page_index,
                budget_ms: self.budget_ms,
            })
        } else {
            Ok(())
        }
    }
}

/// Run the full grouping pipeline for one page, up to sentence units.
pub fn group_page(
    page: &PageInput,
    options: &AnnotateOptions,
    deadline: Option<&Deadline>,
) -> Result<SentenceGroups> {
    let records = normalize_page(
        &page.records,
        page.origin,
        page.index,
        page.width,
        page.height,
    );

    let words: Vec<Word> = match page.granularity {
        RecordGranularity::Characters => assemble_words(&records, options, deadline)?,
        RecordGranularity::Words => pass_through_words(&records),
    };

    let lines = group_lines(page.index, words, options, deadline)?;
    group_sentences(page.index, lines, options)
}

/// Process one page end to end, producing its rendered overlay.
pub fn process_page(page: &PageInput, options: &AnnotateOptions) -> Result<RenderedOverlay> {
    let deadline = Deadline::start(options.per_page_timeout_ms);
    let groups = group_page(page, options, deadline.as_ref())?;
    let layer = overlay::build_overlay(page.index, page.width, page.height, &groups, options);
    if let Some(deadline) = deadline.as_ref() {
        deadline.check(page.index)?;
    }
    overlay::render(&layer)
}

/// Build just the overlay layer for one page, without rendering it.
///
/// Useful for callers that inspect or serialize the geometry instead of
/// compositing it.
pub fn build_page_layer(page: &PageInput, options: &AnnotateOptions) -> Result<OverlayLayer> {
    let deadline = Deadline::start(options.per_page_timeout_ms);
    let groups = group_page(page, options, deadline.as_ref())?;
    Ok(overlay::build_overlay(
        page.index,
        page.width,
        page.height,
        &groups,
        options,
    ))
}

/// Process all pages and composite their overlays into the document.
///
/// Page overlays are produced on a rayon worker pool (or sequentially when
/// `options.parallel` is false), streamed back over a crossbeam channel
/// tagged with their page index, and composited by this single collector in
/// ascending page order. The report lists every composited page and every
/// per-page failure; nothing is silently dropped.
pub fn run(
    doc: &mut lopdf::Document,
    pages: &[PageInput],
    options: &AnnotateOptions,
) -> RunReport {
    let mut results: Vec<(usize, Result<RenderedOverlay>)> = if options.parallel {
        let (tx, rx) = crossbeam_channel::unbounded();
        pages.par_iter().for_each_with(tx, |tx, page| {
            let result = process_page(page, options);
            // The receiver outlives all senders inside this scope.
            let _ = tx.send((page.index, result));
        });
        rx.into_iter().collect()
    } else {
        pages
            .iter()
            .map(|page| (page.index, process_page(page, options)))
            .collect()
    };

    results.sort_by_key(|(index, _)| *index);

    let mut report = RunReport::default();
    for (index, result) in results {
        match result.and_then(|overlay| {
            compose::composite_at_index(doc, index, &overlay).map(|_| ())
        }) {
            Ok(()) => report.record_success(index),
            Err(err) => {
                log::warn!("page {index} failed: {err}");
                report.record_failure(index, &err);
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CoordOrigin, RawRecord};

    fn hello_world_page() -> PageInput {
        PageInput::words(
            0,
            595.0,
            842.0,
            vec![
                RawRecord::new("Hello", 0.0, 780.0, 40.0, 800.0),
                RawRecord::new("world.", 45.0, 780.0, 90.0, 800.0),
            ],
        )
    }

    #[test]
    fn test_group_page_single_sentence() {
        let groups = group_page(&hello_world_page(), &AnnotateOptions::default(), None).unwrap();
        assert_eq!(groups.sentences.len(), 1);
        assert_eq!(groups.sentences[0].id, "s1");
        assert_eq!(groups.sentences[0].lines.len(), 1);
        assert_eq!(groups.sentences[0].text(), "Hello world.");
    }

    #[test]
    fn test_group_page_character_granularity() {
        let records = vec![
            RawRecord::new("H", 0.0, 42.0, 5.0, 62.0),
            RawRecord::new("i", 5.0, 42.0, 8.0, 62.0),
            RawRecord::new(" ", 8.0, 42.0, 11.0, 62.0),
            RawRecord::new("!", 13.0, 42.0, 16.0, 62.0),
        ];
        let page = PageInput::characters(0, 595.0, 842.0, CoordOrigin::TopLeftDown, records);
        let groups = group_page(&page, &AnnotateOptions::default(), None).unwrap();
        assert_eq!(groups.sentences.len(), 1);
        assert_eq!(groups.sentences[0].text(), "Hi !");
        // Flipped into canonical space: near the top of the page.
        let line = &groups.sentences[0].lines[0];
        assert_eq!(line.bbox.y1, 800.0);
    }

    #[test]
    fn test_empty_page_yields_empty_layer() {
        let page = PageInput::words(0, 595.0, 842.0, vec![]);
        let layer = build_page_layer(&page, &AnnotateOptions::default()).unwrap();
        assert!(layer.is_empty());
    }

    #[test]
    fn test_deadline_disabled_for_zero_budget() {
        assert!(Deadline::start(0).is_none());
    }

    #[test]
    fn test_deadline_expires() {
        let deadline = Deadline::start(1).unwrap();
        std::thread::sleep(Duration::from_millis(5));
        let err = deadline.check(7).unwrap_err();
        assert!(matches!(
            err,
            Error::PageTimeout {
                page: 7,
                budget_ms: 1
            }
        ));
    }
}
