use crate::{WorkItem, WorkStatus};

/// One kanban column.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusColumn<'a> {
    pub status: WorkStatus,
    pub items: Vec<&'a WorkItem>,
}

/// Work items partitioned by status.
///
/// Holds one column per known status, in board order, even when empty.
/// Items with a status outside the known set land in `unknown` instead of
/// being dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusColumns<'a> {
    pub columns: Vec<StatusColumn<'a>>,
    pub unknown: Vec<&'a WorkItem>,
}

impl<'a> StatusColumns<'a> {
    pub fn get(&self, status: &WorkStatus) -> &[&'a WorkItem] {
        match status.board_index() {
            Some(index) => &self.columns[index].items,
            None => &[],
        }
    }

    pub fn count(&self, status: &WorkStatus) -> usize {
        self.get(status).len()
    }

    /// Number of items placed in the known columns.
    pub fn known_len(&self) -> usize {
        self.columns.iter().map(|column| column.items.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusColumn<'a>> {
        self.columns.iter()
    }
}

/// Partition `items` by status, preserving the input order inside each column.
pub fn group_by_status<'a>(items: impl IntoIterator<Item = &'a WorkItem>) -> StatusColumns<'a> {
    let mut columns: Vec<StatusColumn<'a>> = WorkStatus::KNOWN
        .into_iter()
        .map(|status| StatusColumn {
            status,
            items: Vec::new(),
        })
        .collect();
    let mut unknown = Vec::new();

    for item in items {
        match item.status.board_index() {
            Some(index) => columns[index].items.push(item),
            None => unknown.push(item),
        }
    }

    StatusColumns { columns, unknown }
}
