//! Read-only projections of a work item list: filtering, sorting, kanban
//! grouping and chart statistics. Nothing here mutates its input.

mod filter;
mod group;
mod sort;
mod stats;

pub use filter::*;
pub use group::*;
pub use sort::*;
pub use stats::*;

use crate::WorkItem;

/// Everything a list view needs to derive what it shows.
#[derive(Debug, Clone, Default)]
pub struct WorkQuery {
    pub filter: WorkFilter,
    pub advanced: AdvancedFilter,
    pub sort: SortConfig,
}

impl WorkMatcher for WorkQuery {
    fn matches(&self, item: &WorkItem) -> bool {
        self.filter.matches(item) && self.advanced.matches(item)
    }
}

impl WorkQuery {
    /// Filtered, then sorted.
    pub fn apply<'a>(&self, items: impl IntoIterator<Item = &'a WorkItem>) -> Vec<&'a WorkItem> {
        sort_works(filter_works(items, self), &self.sort)
    }
}
