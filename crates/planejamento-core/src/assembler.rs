//! Page assembly
//!
//! Reconciles the four paginated activity columns into the list of pages
//! that actually get rendered.

use serde::Serialize;

use crate::model::{Activity, PlanInput};
use crate::paginator::Paginator;

/// Hard cap on rendered pages
pub const MAX_PAGES: usize = 10;

/// One physical output page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    /// Index into the four chunk sequences
    pub index: usize,
    /// 1-based position among rendered pages
    pub number: usize,
}

/// Chunked columns plus the pages selected for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLayout {
    columns: [Vec<String>; 4],
    pages: Vec<usize>,
}

impl PageLayout {
    /// Paginate and assemble a plan with the default policy
    pub fn from_plan(plan: &PlanInput) -> Self {
        Self::from_plan_with(plan, &Paginator::default(), MAX_PAGES)
    }

    /// Paginate and assemble a plan with an explicit policy
    pub fn from_plan_with(plan: &PlanInput, paginator: &Paginator, max_pages: usize) -> Self {
        let columns = Activity::ALL.map(|activity| paginator.paginate(plan.activity(activity)));
        assemble(columns, max_pages)
    }

    /// Number of rendered pages
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Included page indices, in order
    pub fn page_indices(&self) -> &[usize] {
        &self.pages
    }

    /// Rendered pages, in order
    pub fn records(&self) -> impl Iterator<Item = PageRecord> + '_ {
        self.pages
            .iter()
            .enumerate()
            .map(|(pos, &index)| PageRecord {
                index,
                number: pos + 1,
            })
    }

    /// Chunks of one column
    pub fn column(&self, activity: Activity) -> &[String] {
        &self.columns[activity.index()]
    }

    /// Text of one cell; empty when the column ran out of chunks
    pub fn cell(&self, page_index: usize, activity: Activity) -> &str {
        self.column(activity)
            .get(page_index)
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Select the pages to render from four chunk sequences.
///
/// Page 0 is always kept; later pages are kept only when at least one
/// column has non-blank text there.
pub fn assemble(columns: [Vec<String>; 4], max_pages: usize) -> PageLayout {
    let longest = columns.iter().map(Vec::len).max().unwrap_or(0);
    let page_count = longest.max(1).min(max_pages.max(1));

    let pages: Vec<usize> = (0..page_count)
        .filter(|&i| {
            i == 0
                || columns
                    .iter()
                    .any(|col| col.get(i).is_some_and(|chunk| !chunk.trim().is_empty()))
        })
        .collect();

    tracing::debug!(
        candidates = page_count,
        rendered = pages.len(),
        "assembled page layout"
    );

    PageLayout { columns, pages }
}
