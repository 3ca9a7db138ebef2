//! Output page layout for a crop plan.
//!
//! The rewrite walks source pages in order while a [`LayoutCursor`] tracks
//! the next output page and the number of pages inserted so far. Each step
//! yields a [`SourcePlacement`]: where the copies of a source page land in
//! the output and which bookmark targets move because of them.

use std::ops::Range;

use crate::bookmark::Bookmark;
use crate::plan::CropPlan;
use crate::ratio::CropRatio;

/// Bookmark targets in `low..=high` (1-based output pages) move by `shift`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftWindow {
    pub low: usize,
    pub high: usize,
    pub shift: usize,
}

impl ShiftWindow {
    pub fn contains(&self, page: usize) -> bool {
        (self.low..=self.high).contains(&page)
    }
}

/// Accumulator threaded through the source pages.
///
/// `new_page_number` is the 1-based output page the next source page starts
/// at. It only ever grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutCursor {
    new_page_number: usize,
    inserted: usize,
}

impl Default for LayoutCursor {
    fn default() -> Self {
        Self {
            new_page_number: 1,
            inserted: 0,
        }
    }
}

impl LayoutCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_page_number(&self) -> usize {
        self.new_page_number
    }

    /// Pages inserted by multiplication so far.
    pub fn inserted(&self) -> usize {
        self.inserted
    }

    /// Step past `source_page` carrying `rect_count` rectangles.
    ///
    /// Returns the cursor for the next source page together with the
    /// bookmark shift caused by this page, if it was multiplied. The window
    /// starts right after the page's first copy (where its own bookmarks
    /// stay) and reaches `page_count + (new_page_number - source_page)`,
    /// which covers every later target.
    pub fn advance(
        self,
        source_page: usize,
        rect_count: usize,
        page_count: usize,
    ) -> (LayoutCursor, Option<ShiftWindow>) {
        let copies = rect_count.max(1);
        let first = self.new_page_number;
        let next = LayoutCursor {
            new_page_number: first + copies,
            inserted: self.inserted + copies - 1,
        };
        let window = (copies > 1).then(|| ShiftWindow {
            low: first + 1,
            high: page_count + (next.new_page_number - source_page),
            shift: copies - 1,
        });
        (next, window)
    }
}

/// Placement of one source page in the output.
#[derive(Debug, Clone, PartialEq)]
pub struct SourcePlacement {
    /// 1-based source page number.
    pub source_page: usize,
    /// 1-based output page of the first copy.
    pub first_output_page: usize,
    /// Ratios applied to the copies, in order. Empty means untouched.
    pub ratios: Vec<CropRatio>,
    /// Bookmark shift caused by multiplying this page.
    pub shift: Option<ShiftWindow>,
}

impl SourcePlacement {
    /// Number of output pages produced from this source page.
    pub fn copies(&self) -> usize {
        self.ratios.len().max(1)
    }

    /// 1-based output pages holding the copies.
    pub fn output_pages(&self) -> Range<usize> {
        self.first_output_page..self.first_output_page + self.copies()
    }

    /// `(output page, ratio)` for every copy that gets new boxes.
    pub fn cropped_pages(&self) -> impl Iterator<Item = (usize, &CropRatio)> + '_ {
        self.ratios
            .iter()
            .enumerate()
            .map(|(i, ratio)| (self.first_output_page + i, ratio))
    }
}

/// Where every source page ends up once the plan is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    placements: Vec<SourcePlacement>,
    output_page_count: usize,
}

impl PageLayout {
    /// Fold the plan's pages through a [`LayoutCursor`].
    pub fn from_plan(plan: &CropPlan) -> Self {
        let page_count = plan.page_count();
        let mut placements = Vec::with_capacity(page_count);
        let cursor = plan
            .iter()
            .fold(LayoutCursor::new(), |cursor, (source_page, ratios)| {
                let (next, shift) = cursor.advance(source_page, ratios.len(), page_count);
                placements.push(SourcePlacement {
                    source_page,
                    first_output_page: cursor.new_page_number(),
                    ratios: ratios.to_vec(),
                    shift,
                });
                next
            });

        Self {
            placements,
            output_page_count: cursor.new_page_number() - 1,
        }
    }

    pub fn placements(&self) -> &[SourcePlacement] {
        &self.placements
    }

    pub fn source_page_count(&self) -> usize {
        self.placements.len()
    }

    pub fn output_page_count(&self) -> usize {
        self.output_page_count
    }

    /// Number of copies of each source page, indexed by 0-based page.
    pub fn copies(&self) -> Vec<usize> {
        self.placements.iter().map(SourcePlacement::copies).collect()
    }

    /// Move bookmark targets so they follow their pages into the output.
    ///
    /// Windows are applied in source order, so each one sees the targets as
    /// already moved by earlier pages. Bookmarks without a page are left
    /// alone.
    pub fn shift_bookmarks(&self, bookmarks: &mut [Bookmark]) {
        for window in self.placements.iter().filter_map(|p| p.shift) {
            for bookmark in bookmarks.iter_mut() {
                if let Some(index) = bookmark.page_number {
                    if window.contains(index + 1) {
                        bookmark.page_number = Some(index + window.shift);
                    }
                }
            }
        }
    }
}
