use std::cmp::Ordering;

use strum::{Display, EnumString};

use crate::WorkItem;

/// Column a list view can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum SortKey {
    #[strum(to_string = "id", serialize = "_id")]
    Id,
    #[strum(to_string = "workType", serialize = "work-type", serialize = "type")]
    WorkType,
    #[strum(to_string = "workDesc", serialize = "work-desc", serialize = "desc")]
    WorkDesc,
    #[strum(to_string = "startDate", serialize = "start-date", serialize = "start")]
    StartDate,
    #[strum(to_string = "endDate", serialize = "end-date", serialize = "end")]
    EndDate,
    #[strum(to_string = "status")]
    Status,
    #[strum(to_string = "priority")]
    Priority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Current sort of a list view. No key means source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortConfig {
    pub key: Option<SortKey>,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn by(key: SortKey, direction: SortDirection) -> Self {
        Self {
            key: Some(key),
            direction,
        }
    }

    /// Column header click: the same key flips the direction, a new key
    /// starts ascending.
    pub fn request(&mut self, key: SortKey) {
        self.direction = if self.key == Some(key) {
            self.direction.toggled()
        } else {
            SortDirection::Ascending
        };
        self.key = Some(key);
    }
}

/// Stable sort of `items` by `config`.
///
/// Text compares lexicographically, dates chronologically, status by board
/// column and priority by severity. Missing values (no date, unknown status
/// or priority) go last in either direction.
pub fn sort_works<'a>(
    items: impl IntoIterator<Item = &'a WorkItem>,
    config: &SortConfig,
) -> Vec<&'a WorkItem> {
    let mut sorted: Vec<&WorkItem> = items.into_iter().collect();
    if let Some(key) = config.key {
        sorted.sort_by(|a, b| compare(a, b, key, config.direction));
    }
    sorted
}

fn compare(a: &WorkItem, b: &WorkItem, key: SortKey, direction: SortDirection) -> Ordering {
    match key {
        SortKey::Id => direction.apply(a.id.cmp(&b.id)),
        SortKey::WorkType => direction.apply(a.work_type.cmp(&b.work_type)),
        SortKey::WorkDesc => direction.apply(a.work_desc.cmp(&b.work_desc)),
        SortKey::StartDate => compare_present(a.start_date, b.start_date, direction),
        SortKey::EndDate => compare_present(a.end_date, b.end_date, direction),
        SortKey::Status => {
            compare_present(a.status.board_index(), b.status.board_index(), direction)
        }
        SortKey::Priority => compare_present(a.priority.rank(), b.priority.rank(), direction),
    }
}

fn compare_present<T: Ord>(a: Option<T>, b: Option<T>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => direction.apply(a.cmp(&b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
