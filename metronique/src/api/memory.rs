use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use time::OffsetDateTime;

use super::WorkApi;
use crate::session::AuthToken;
use crate::{
    NewProject, NewWorkItem, Project, ProjectDetails, ProjectId, WorkError, WorkId, WorkItem,
    WorkStatus,
};

/// In-process backend for dev mode and tests.
///
/// Clones share the same state, so a test can keep a handle to inspect what
/// a pipeline did to it.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkApi {
    store: Arc<Mutex<Backend>>,
}

#[derive(Debug, Default)]
struct Backend {
    projects: Vec<Project>,
    works: HashMap<ProjectId, Vec<WorkItem>>,
    required_token: Option<String>,
    /// Injected failures keyed by request number, counting from 1.
    failures: HashMap<usize, u16>,
    requests: usize,
    next_id: u64,
}

impl InMemoryWorkApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a project and its work items.
    pub fn with_project(self, project: Project, works: Vec<WorkItem>) -> Self {
        {
            let mut backend = self.lock();
            backend.works.insert(project.id.clone(), works);
            backend.projects.push(project);
        }
        self
    }

    /// Reject every call whose token differs with 401.
    pub fn with_required_token(self, token: &str) -> Self {
        self.lock().required_token = Some(token.to_string());
        self
    }

    /// Make the next call fail with `status`.
    pub fn fail_next(&self, status: u16) {
        self.fail_after(0, status);
    }

    /// Let `skip` calls through, then fail the one after with `status`.
    pub fn fail_after(&self, skip: usize, status: u16) {
        let mut backend = self.lock();
        let at = backend.requests + skip + 1;
        backend.failures.insert(at, status);
    }

    /// Number of calls received so far, failed ones included.
    pub fn request_count(&self) -> usize {
        self.lock().requests
    }

    /// Snapshot of the stored work items of `project`.
    pub fn works(&self, project: &ProjectId) -> Vec<WorkItem> {
        self.lock().works.get(project).cloned().unwrap_or_default()
    }

    fn lock(&self) -> MutexGuard<'_, Backend> {
        self.store.lock().expect("in-memory backend lock poisoned")
    }

    /// Count the call, then apply the auth check and any injected failure.
    fn begin(&self, token: &AuthToken) -> Result<MutexGuard<'_, Backend>, WorkError> {
        let mut backend = self.lock();
        backend.requests += 1;

        let request = backend.requests;
        if let Some(status) = backend.failures.remove(&request) {
            return Err(WorkError::Http { status });
        }
        if let Some(required) = &backend.required_token {
            if required != token.as_str() {
                return Err(WorkError::Http { status: 401 });
            }
        }
        Ok(backend)
    }
}

impl Backend {
    fn project_works(&mut self, project: &ProjectId) -> Result<&mut Vec<WorkItem>, WorkError> {
        self.works
            .get_mut(project)
            .ok_or(WorkError::Http { status: 404 })
    }

    fn generate_id(&mut self) -> String {
        self.next_id += 1;
        format!("mem-{:04}", self.next_id)
    }
}

#[async_trait]
impl WorkApi for InMemoryWorkApi {
    async fn list_works(
        &self,
        token: &AuthToken,
        project: &ProjectId,
    ) -> Result<Vec<WorkItem>, WorkError> {
        let mut backend = self.begin(token)?;
        backend.project_works(project).map(|works| works.clone())
    }

    async fn get_work(
        &self,
        token: &AuthToken,
        project: &ProjectId,
        work: &WorkId,
    ) -> Result<WorkItem, WorkError> {
        let mut backend = self.begin(token)?;
        backend
            .project_works(project)?
            .iter()
            .find(|item| &item.id == work)
            .cloned()
            .ok_or(WorkError::Http { status: 404 })
    }

    async fn create_work(
        &self,
        token: &AuthToken,
        project: &ProjectId,
        new: &NewWorkItem,
    ) -> Result<(), WorkError> {
        let mut backend = self.begin(token)?;
        let id = WorkId::new(backend.generate_id());
        let item = WorkItem {
            id,
            work_type: new.work_type.clone(),
            work_desc: new.work_desc.clone(),
            status: new.status.clone(),
            priority: new.priority.clone(),
            tags: new.tags.clone(),
            start_date: new.start_date,
            end_date: new.end_date,
            work_link: new.work_link.clone(),
            work_files: new.work_files.clone(),
            project: Some(project.clone()),
        };
        backend.project_works(project)?.push(item);
        Ok(())
    }

    async fn update_status(
        &self,
        token: &AuthToken,
        project: &ProjectId,
        work: &WorkId,
        status: &WorkStatus,
    ) -> Result<(), WorkError> {
        let mut backend = self.begin(token)?;
        let item = backend
            .project_works(project)?
            .iter_mut()
            .find(|item| &item.id == work)
            .ok_or(WorkError::Http { status: 404 })?;
        item.status = status.clone();
        Ok(())
    }

    async fn delete_work(
        &self,
        token: &AuthToken,
        project: &ProjectId,
        work: &WorkId,
    ) -> Result<(), WorkError> {
        let mut backend = self.begin(token)?;
        let works = backend.project_works(project)?;
        let index = works
            .iter()
            .position(|item| &item.id == work)
            .ok_or(WorkError::Http { status: 404 })?;
        works.remove(index);
        Ok(())
    }

    async fn list_projects(&self, token: &AuthToken) -> Result<Vec<Project>, WorkError> {
        let backend = self.begin(token)?;
        Ok(backend.projects.clone())
    }

    async fn get_project(
        &self,
        token: &AuthToken,
        project: &ProjectId,
    ) -> Result<ProjectDetails, WorkError> {
        let backend = self.begin(token)?;
        let found = backend
            .projects
            .iter()
            .find(|p| &p.id == project)
            .cloned()
            .ok_or(WorkError::Http { status: 404 })?;

        Ok(ProjectDetails {
            project: found,
            works: backend.works.get(project).cloned().unwrap_or_default(),
        })
    }

    async fn create_project(&self, token: &AuthToken, new: &NewProject) -> Result<(), WorkError> {
        let mut backend = self.begin(token)?;
        let id = ProjectId::new(backend.generate_id());
        backend.works.insert(id.clone(), Vec::new());
        backend.projects.push(Project {
            id,
            project_name: new.project_name.clone(),
            project_desc: new.project_desc.clone(),
            created_at: Some(OffsetDateTime::now_utc()),
        });
        Ok(())
    }

    async fn update_project(
        &self,
        token: &AuthToken,
        project: &ProjectId,
        changes: &NewProject,
    ) -> Result<(), WorkError> {
        let mut backend = self.begin(token)?;
        let found = backend
            .projects
            .iter_mut()
            .find(|p| &p.id == project)
            .ok_or(WorkError::Http { status: 404 })?;
        found.project_name = changes.project_name.clone();
        found.project_desc = changes.project_desc.clone();
        Ok(())
    }

    async fn delete_project(
        &self,
        token: &AuthToken,
        project: &ProjectId,
    ) -> Result<(), WorkError> {
        let mut backend = self.begin(token)?;
        let index = backend
            .projects
            .iter()
            .position(|p| &p.id == project)
            .ok_or(WorkError::Http { status: 404 })?;
        backend.projects.remove(index);
        backend.works.remove(project);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: &str) -> Project {
        Project {
            id: ProjectId::from(id),
            project_name: format!("Project {id}"),
            project_desc: String::new(),
            created_at: None,
        }
    }

    #[tokio::test]
    async fn rejects_wrong_token_with_401() {
        let api = InMemoryWorkApi::new()
            .with_project(project("p1"), vec![])
            .with_required_token("good");

        let result = api
            .list_works(&AuthToken::new("bad"), &ProjectId::from("p1"))
            .await;

        assert_eq!(result, Err(WorkError::Http { status: 401 }));
        assert_eq!(api.request_count(), 1);
    }

    #[tokio::test]
    async fn injected_failure_applies_once() {
        let api = InMemoryWorkApi::new().with_project(project("p1"), vec![]);
        let token = AuthToken::new("t");
        api.fail_next(503);

        assert_eq!(
            api.list_projects(&token).await,
            Err(WorkError::Http { status: 503 })
        );
        assert_eq!(api.list_projects(&token).await.map(|p| p.len()), Ok(1));
    }

    #[tokio::test]
    async fn delayed_failure_hits_the_chosen_call() {
        let api = InMemoryWorkApi::new().with_project(project("p1"), vec![]);
        let token = AuthToken::new("t");
        api.fail_after(1, 502);

        assert!(api.list_projects(&token).await.is_ok());
        assert_eq!(
            api.list_projects(&token).await,
            Err(WorkError::Http { status: 502 })
        );
        assert!(api.list_projects(&token).await.is_ok());
    }

    #[tokio::test]
    async fn project_lifecycle() {
        let api = InMemoryWorkApi::new();
        let token = AuthToken::new("t");

        api.create_project(&token, &NewProject::new("Site", "Relaunch"))
            .await
            .expect("create");
        let projects = api.list_projects(&token).await.expect("list");
        assert_eq!(projects.len(), 1);

        let id = projects[0].id.clone();
        let details = api.get_project(&token, &id).await.expect("get");
        assert_eq!(details.project.project_name, "Site");
        assert!(details.works.is_empty());

        api.update_project(&token, &id, &NewProject::new("Shop", "Checkout"))
            .await
            .expect("update");
        let details = api.get_project(&token, &id).await.expect("get");
        assert_eq!(details.project.project_name, "Shop");
        assert_eq!(details.project.project_desc, "Checkout");

        api.delete_project(&token, &id).await.expect("delete");
        assert_eq!(
            api.get_project(&token, &id).await,
            Err(WorkError::Http { status: 404 })
        );
        assert_eq!(
            api.update_project(&token, &id, &NewProject::new("Shop", "Checkout")).await,
            Err(WorkError::Http { status: 404 })
        );
    }

    #[tokio::test]
    async fn unknown_project_is_404() {
        let api = InMemoryWorkApi::new();
        let result = api
            .list_works(&AuthToken::new("t"), &ProjectId::from("nope"))
            .await;

        assert_eq!(result, Err(WorkError::Http { status: 404 }));
    }
}
