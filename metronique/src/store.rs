use crate::{WorkId, WorkItem, WorkPatch};

/// Loading state of a [`WorkStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

/// In-memory list of work items for one view of one project.
///
/// Populated once by a fetch, then only changed by confirmed mutations.
/// Stores are never shared between views.
#[derive(Debug, Clone, Default)]
pub struct WorkStore {
    items: Vec<WorkItem>,
    state: LoadState,
}

impl WorkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[WorkItem] {
        &self.items
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &WorkId) -> Option<&WorkItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn replace_all(&mut self, items: Vec<WorkItem>) {
        self.items = items;
        self.state = LoadState::Ready;
    }

    pub fn mark_loading(&mut self) {
        self.state = LoadState::Loading;
    }

    /// Record a failed fetch. Items already held are kept.
    pub fn mark_failed(&mut self, message: impl Into<String>) {
        self.state = LoadState::Failed(message.into());
    }

    /// Remove the item with `id`. Returns false (and changes nothing) when absent.
    pub fn remove_by_id(&mut self, id: &WorkId) -> bool {
        match self.items.iter().position(|item| &item.id == id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Apply `patch` to the item with `id`. Returns false when absent.
    pub fn patch_by_id(&mut self, id: &WorkId, patch: &WorkPatch) -> bool {
        match self.items.iter_mut().find(|item| &item.id == id) {
            Some(item) => {
                patch.apply(item);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WorkStatus;

    fn item(id: &str, status: &str) -> WorkItem {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "workType": "Development",
            "workDesc": format!("work {id}"),
            "status": status,
        }))
        .expect("work item fixture")
    }

    fn ids(store: &WorkStore) -> Vec<&str> {
        store.items().iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn new_store_is_loading_and_empty() {
        let store = WorkStore::new();
        assert_eq!(store.state(), &LoadState::Loading);
        assert!(store.is_empty());
    }

    #[test]
    fn replace_all_marks_ready() {
        let mut store = WorkStore::new();
        store.replace_all(vec![item("1", "TODO"), item("2", "Completed")]);

        assert_eq!(store.state(), &LoadState::Ready);
        assert_eq!(ids(&store), vec!["1", "2"]);
    }

    #[test]
    fn remove_by_id_removes_exactly_one() {
        let mut store = WorkStore::new();
        store.replace_all(vec![item("1", "TODO"), item("2", "TODO"), item("3", "TODO")]);

        assert!(store.remove_by_id(&WorkId::from("2")));
        assert_eq!(ids(&store), vec!["1", "3"]);
    }

    #[test]
    fn remove_by_id_is_noop_for_missing_id() {
        let mut store = WorkStore::new();
        store.replace_all(vec![item("1", "TODO")]);

        assert!(!store.remove_by_id(&WorkId::from("9")));
        assert!(!store.remove_by_id(&WorkId::from("9")));
        assert_eq!(ids(&store), vec!["1"]);
    }

    #[test]
    fn patch_by_id_keeps_length_and_other_items() {
        let mut store = WorkStore::new();
        store.replace_all(vec![item("1", "TODO"), item("2", "Completed")]);
        let untouched = store.items()[1].clone();

        assert!(store.patch_by_id(&WorkId::from("1"), &WorkPatch::status(WorkStatus::Completed)));

        assert_eq!(store.len(), 2);
        assert_eq!(store.items()[0].status, WorkStatus::Completed);
        assert_eq!(store.items()[1], untouched);
    }

    #[test]
    fn failed_fetch_keeps_existing_items() {
        let mut store = WorkStore::new();
        store.replace_all(vec![item("1", "TODO")]);
        store.mark_failed("HTTP error! status: 500");

        assert_eq!(store.state(), &LoadState::Failed("HTTP error! status: 500".into()));
        assert_eq!(store.len(), 1);
    }
}
