use time::OffsetDateTime;

use crate::{Priority, WorkItem, WorkStatus};

/// A predicate over work items.
pub trait WorkMatcher {
    fn matches(&self, item: &WorkItem) -> bool;
}

/// Keep the items accepted by `matcher`, in their original order.
pub fn filter_works<'a, M: WorkMatcher + ?Sized>(
    items: impl IntoIterator<Item = &'a WorkItem>,
    matcher: &M,
) -> Vec<&'a WorkItem> {
    items
        .into_iter()
        .filter(|item| matcher.matches(item))
        .collect()
}

/// Search box and priority dropdown of the list views.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkFilter {
    /// Matched case-insensitively against `workType` and `workDesc`.
    pub search_term: String,
    pub priority: Option<Priority>,
}

impl WorkFilter {
    pub fn new(search_term: impl Into<String>, priority: Option<Priority>) -> Self {
        Self {
            search_term: search_term.into(),
            priority,
        }
    }
}

impl WorkMatcher for WorkFilter {
    fn matches(&self, item: &WorkItem) -> bool {
        let matches_search = item.contains_text(&self.search_term.to_lowercase());
        let matches_priority = self
            .priority
            .as_ref()
            .map_or(true, |priority| &item.priority == priority);

        matches_search && matches_priority
    }
}

/// Criteria of the filter panel. Unset criteria accept everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvancedFilter {
    pub work_type: Option<String>,
    pub status: Option<WorkStatus>,
    pub priority: Option<Priority>,
    /// Every listed tag must be present on the item.
    pub tags: Vec<String>,
    pub start_from: Option<OffsetDateTime>,
    pub end_until: Option<OffsetDateTime>,
    pub has_link: Option<bool>,
    pub has_files: Option<bool>,
}

impl AdvancedFilter {
    /// Number of criteria in use; the date window counts once.
    pub fn active_count(&self) -> usize {
        [
            self.work_type.is_some(),
            self.status.is_some(),
            self.priority.is_some(),
            !self.tags.is_empty(),
            self.start_from.is_some() || self.end_until.is_some(),
            self.has_link.is_some(),
            self.has_files.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// Add a tag criterion, ignoring blanks and repeats.
    pub fn add_tag(&mut self, tag: &str) {
        let tag = tag.trim();
        if !tag.is_empty() && !self.tags.iter().any(|t| t == tag) {
            self.tags.push(tag.to_string());
        }
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl WorkMatcher for AdvancedFilter {
    fn matches(&self, item: &WorkItem) -> bool {
        if let Some(work_type) = &self.work_type {
            if !item.work_type.eq_ignore_ascii_case(work_type) {
                return false;
            }
        }
        if let Some(status) = &self.status {
            if &item.status != status {
                return false;
            }
        }
        if let Some(priority) = &self.priority {
            if &item.priority != priority {
                return false;
            }
        }
        if !self.tags.iter().all(|tag| item.tags.contains(tag)) {
            return false;
        }
        if let Some(from) = self.start_from {
            if !item.start_date.is_some_and(|start| start >= from) {
                return false;
            }
        }
        if let Some(until) = self.end_until {
            if !item.end_date.is_some_and(|end| end <= until) {
                return false;
            }
        }
        if let Some(has_link) = self.has_link {
            if item.has_link() != has_link {
                return false;
            }
        }
        if let Some(has_files) = self.has_files {
            if item.has_files() != has_files {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    fn item(value: serde_json::Value) -> WorkItem {
        serde_json::from_value(value).expect("work item fixture")
    }

    fn sample() -> Vec<WorkItem> {
        vec![
            item(json!({"_id": "1", "workType": "Development", "workDesc": "fix bug", "priority": "High"})),
            item(json!({"_id": "2", "workType": "Development", "workDesc": "fix bug", "priority": "Low"})),
            item(json!({"_id": "3", "workType": "Design", "workDesc": "New BUG icon", "priority": "High"})),
            item(json!({"_id": "4", "workType": "Research", "workDesc": "Spike", "priority": "Medium"})),
        ]
    }

    fn ids(items: &[&WorkItem]) -> Vec<String> {
        items.iter().map(|i| i.id.to_string()).collect()
    }

    #[test]
    fn search_and_priority_are_anded() {
        let items = sample();
        let filter = WorkFilter::new("bug", Some(Priority::High));

        assert_eq!(ids(&filter_works(&items, &filter)), vec!["1", "3"]);
    }

    #[test]
    fn search_only_first_two_items() {
        let items = vec![
            item(json!({"_id": "a", "workDesc": "fix bug", "priority": "High"})),
            item(json!({"_id": "b", "workDesc": "fix bug", "priority": "Low"})),
        ];
        let filter = WorkFilter::new("bug", Some(Priority::High));

        assert_eq!(ids(&filter_works(&items, &filter)), vec!["a"]);
    }

    #[test]
    fn empty_filter_matches_everything() {
        let items = sample();
        assert_eq!(filter_works(&items, &WorkFilter::default()).len(), items.len());
    }

    #[test]
    fn every_result_contains_the_term() {
        let items = sample();
        for term in ["BUG", "dev", "x", "spike", ""] {
            let result = filter_works(&items, &WorkFilter::new(term, None));
            assert!(result.len() <= items.len());
            let needle = term.to_lowercase();
            for work in result {
                assert!(
                    work.work_type.to_lowercase().contains(&needle)
                        || work.work_desc.to_lowercase().contains(&needle)
                );
            }
        }
    }

    #[test]
    fn advanced_filter_applies_every_criterion() {
        let items = vec![
            item(json!({
                "_id": "1", "workType": "Design", "status": "Completed", "priority": "High",
                "tags": ["UI", "Frontend"], "workLink": ["https://x"],
                "startDate": "2025-03-02T00:00:00Z", "endDate": "2025-03-10T00:00:00Z"
            })),
            item(json!({
                "_id": "2", "workType": "design", "status": "Completed", "priority": "High",
                "tags": ["UI"], "workLink": [""],
                "startDate": "2025-03-02T00:00:00Z", "endDate": "2025-03-10T00:00:00Z"
            })),
            item(json!({"_id": "3", "workType": "Design", "status": "Completed", "priority": "High"})),
        ];

        let mut filter = AdvancedFilter {
            work_type: Some("DESIGN".into()),
            status: Some(WorkStatus::Completed),
            priority: Some(Priority::High),
            start_from: Some(datetime!(2025-03-01 0:00 UTC)),
            end_until: Some(datetime!(2025-03-31 0:00 UTC)),
            ..AdvancedFilter::default()
        };
        assert_eq!(ids(&filter_works(&items, &filter)), vec!["1", "2"]);

        filter.add_tag("Frontend");
        assert_eq!(ids(&filter_works(&items, &filter)), vec!["1"]);

        filter.remove_tag("Frontend");
        filter.has_link = Some(false);
        assert_eq!(ids(&filter_works(&items, &filter)), vec!["2"]);
    }

    #[test]
    fn active_count_counts_date_window_once() {
        let mut filter = AdvancedFilter::default();
        assert!(filter.is_empty());

        filter.start_from = Some(datetime!(2025-01-01 0:00 UTC));
        filter.end_until = Some(datetime!(2025-02-01 0:00 UTC));
        filter.add_tag("UI");
        filter.add_tag(" UI ");
        filter.has_files = Some(true);

        assert_eq!(filter.tags, vec!["UI".to_string()]);
        assert_eq!(filter.active_count(), 3);

        filter.clear();
        assert!(filter.is_empty());
    }
}
