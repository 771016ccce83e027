use std::collections::BTreeMap;

use itertools::Itertools;
use time::Date;

use crate::{Priority, WorkItem, WorkStatus};

/// Per-day status counts, keyed by start date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelinePoint {
    pub date: Date,
    /// Counts for each known status, in board order.
    pub counts: [usize; 5],
}

impl TimelinePoint {
    pub fn count(&self, status: &WorkStatus) -> usize {
        status.board_index().map_or(0, |index| self.counts[index])
    }
}

/// Aggregates behind the chart view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkStats {
    pub total: usize,
    /// In order of first appearance.
    pub by_status: Vec<(WorkStatus, usize)>,
    /// In order of first appearance.
    pub by_priority: Vec<(Priority, usize)>,
    /// Sorted by work type.
    pub by_work_type: Vec<(String, usize)>,
    /// Ascending by date; items without a start date are skipped.
    pub timeline: Vec<TimelinePoint>,
    pub completed: usize,
    pub in_progress: usize,
    pub high_priority: usize,
}

impl WorkStats {
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a WorkItem>) -> Self {
        let items: Vec<&WorkItem> = items.into_iter().collect();

        let by_work_type = items
            .iter()
            .map(|item| item.work_type.clone())
            .counts()
            .into_iter()
            .sorted()
            .collect();

        let mut timeline: BTreeMap<Date, [usize; 5]> = BTreeMap::new();
        for item in &items {
            let Some(start) = item.start_date else {
                continue;
            };
            let counts = timeline.entry(start.date()).or_default();
            if let Some(index) = item.status.board_index() {
                counts[index] += 1;
            }
        }

        Self {
            total: items.len(),
            by_status: count_in_order(items.iter().map(|item| &item.status)),
            by_priority: count_in_order(items.iter().map(|item| &item.priority)),
            by_work_type,
            timeline: timeline
                .into_iter()
                .map(|(date, counts)| TimelinePoint { date, counts })
                .collect(),
            completed: items
                .iter()
                .filter(|item| item.status == WorkStatus::Completed)
                .count(),
            in_progress: items
                .iter()
                .filter(|item| item.status == WorkStatus::InProgress)
                .count(),
            high_priority: items
                .iter()
                .filter(|item| item.priority == Priority::High)
                .count(),
        }
    }
}

fn count_in_order<'a, T>(values: impl Iterator<Item = &'a T>) -> Vec<(T, usize)>
where
    T: PartialEq + Clone + 'a,
{
    let mut counts: Vec<(T, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(seen, _)| seen == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value.clone(), 1)),
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::date;

    fn item(value: serde_json::Value) -> WorkItem {
        serde_json::from_value(value).expect("work item fixture")
    }

    #[test]
    fn counts_and_timeline() {
        let items = vec![
            item(json!({"_id": "1", "workType": "Testing", "status": "Completed", "priority": "High",
                        "startDate": "2025-03-02T09:00:00Z"})),
            item(json!({"_id": "2", "workType": "Design", "status": "In Progress", "priority": "Low",
                        "startDate": "2025-03-01T09:00:00Z"})),
            item(json!({"_id": "3", "workType": "Design", "status": "Completed", "priority": "High",
                        "startDate": "2025-03-02T18:00:00Z"})),
            item(json!({"_id": "4", "workType": "Design", "status": "Pending", "priority": "Medium"})),
        ];

        let stats = WorkStats::from_items(&items);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.high_priority, 2);
        assert_eq!(
            stats.by_status,
            vec![
                (WorkStatus::Completed, 2),
                (WorkStatus::InProgress, 1),
                (WorkStatus::Other("Pending".into()), 1),
            ]
        );
        assert_eq!(
            stats.by_priority,
            vec![(Priority::High, 2), (Priority::Low, 1), (Priority::Medium, 1)]
        );
        assert_eq!(
            stats.by_work_type,
            vec![("Design".to_string(), 3), ("Testing".to_string(), 1)]
        );

        assert_eq!(stats.timeline.len(), 2);
        assert_eq!(stats.timeline[0].date, date!(2025 - 03 - 01));
        assert_eq!(stats.timeline[0].count(&WorkStatus::InProgress), 1);
        assert_eq!(stats.timeline[1].date, date!(2025 - 03 - 02));
        assert_eq!(stats.timeline[1].count(&WorkStatus::Completed), 2);
    }

    #[test]
    fn empty_input_gives_empty_stats() {
        assert_eq!(WorkStats::from_items(&Vec::<WorkItem>::new()), WorkStats::default());
    }
}
