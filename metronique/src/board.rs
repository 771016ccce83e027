use tracing::{debug, warn};

use crate::api::WorkApi;
use crate::session::Session;
use crate::view::{filter_works, group_by_status, StatusColumns, WorkQuery, WorkStats};
use crate::{NewWorkItem, WorkError, WorkId, WorkItem, WorkPatch, WorkStatus, WorkStore};

/// Work items of one project as seen by one view.
///
/// Fetches once on [`load`](Self::load), then keeps its [`WorkStore`] in
/// step with the backend by applying each mutation locally only after the
/// backend confirmed it. Two boards on the same project do not see each
/// other's changes until they reload.
pub struct WorkBoard<A: WorkApi> {
    api: A,
    session: Session,
    store: WorkStore,
}

impl<A: WorkApi> WorkBoard<A> {
    pub fn new(api: A, session: Session) -> Self {
        Self {
            api,
            session,
            store: WorkStore::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &WorkStore {
        &self.store
    }

    pub fn items(&self) -> &[WorkItem] {
        self.store.items()
    }

    /// A loaded work item by id.
    pub fn work(&self, id: &WorkId) -> Result<&WorkItem, WorkError> {
        self.store
            .get(id)
            .ok_or_else(|| WorkError::NotFound(id.to_string()))
    }

    /// Fetch all work items of the session's project into the store.
    ///
    /// On failure the store is marked failed and keeps whatever it held.
    pub async fn load(&mut self) -> Result<(), WorkError> {
        self.store.mark_loading();

        let fetched = self.fetch().await;
        match fetched {
            Ok(items) => {
                debug!("loaded {} work items", items.len());
                self.store.replace_all(items);
                Ok(())
            }
            Err(e) => {
                warn!("failed to load work items: {}", e);
                self.store.mark_failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Re-issue the initial fetch.
    pub async fn retry(&mut self) -> Result<(), WorkError> {
        self.load().await
    }

    async fn fetch(&self) -> Result<Vec<WorkItem>, WorkError> {
        let project = self.session.require_project()?;
        let token = self.session.require_token()?;
        self.api.list_works(token, project).await
    }

    /// Set the status of a work item, then patch the local copy.
    pub async fn update_status(
        &mut self,
        id: &WorkId,
        status: WorkStatus,
    ) -> Result<(), WorkError> {
        let project = self.session.require_project()?;
        let token = self.session.require_token()?;

        if let Err(e) = self.api.update_status(token, project, id, &status).await {
            warn!("failed to update status of work {}: {}", id, e);
            return Err(e);
        }

        self.store.patch_by_id(id, &WorkPatch::status(status));
        Ok(())
    }

    /// Kanban move. Returns false, without calling the backend, when the
    /// item already sits in the target column.
    pub async fn move_to_column(
        &mut self,
        id: &WorkId,
        status: WorkStatus,
    ) -> Result<bool, WorkError> {
        if self.store.get(id).is_some_and(|item| item.status == status) {
            return Ok(false);
        }
        self.update_status(id, status).await?;
        Ok(true)
    }

    /// Delete a work item, then drop the local copy.
    pub async fn delete_work(&mut self, id: &WorkId) -> Result<(), WorkError> {
        let project = self.session.require_project()?;
        let token = self.session.require_token()?;

        if let Err(e) = self.api.delete_work(token, project, id).await {
            warn!("failed to delete work {}: {}", id, e);
            return Err(e);
        }

        self.store.remove_by_id(id);
        Ok(())
    }

    /// Validate and submit a new work item, then reload the list.
    ///
    /// Succeeds once the backend accepted the item. A failed reload is only
    /// logged and left in the store state, so callers never resubmit an item
    /// that already exists.
    pub async fn create_work(&mut self, new: NewWorkItem) -> Result<(), WorkError> {
        let project = self.session.require_project()?;
        let token = self.session.require_token()?;

        let new = new.cleaned();
        new.validate()?;
        let new = new.for_project(project.clone());

        self.api.create_work(token, project, &new).await?;

        if let Err(e) = self.load().await {
            warn!("work item created but reload failed: {}", e);
        }
        Ok(())
    }

    /// Filtered and sorted projection for the table and card views.
    pub fn visible(&self, query: &WorkQuery) -> Vec<&WorkItem> {
        query.apply(self.store.items())
    }

    /// Filtered kanban columns. Sorting does not apply to the board.
    pub fn columns(&self, query: &WorkQuery) -> StatusColumns<'_> {
        group_by_status(filter_works(self.store.items(), query))
    }

    /// Chart aggregates over every loaded item.
    pub fn stats(&self) -> WorkStats {
        WorkStats::from_items(self.store.items())
    }
}
