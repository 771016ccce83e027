mod dto;
mod http;
mod memory;

pub use http::HttpWorkApi;
pub use memory::InMemoryWorkApi;

use async_trait::async_trait;

use crate::session::AuthToken;
use crate::{
    NewProject, NewWorkItem, Project, ProjectDetails, ProjectId, WorkError, WorkId, WorkItem,
    WorkStatus,
};

/// Outbound port to the project/work REST backend.
///
/// Every call carries the token explicitly; implementations keep no
/// credentials of their own.
#[async_trait]
pub trait WorkApi: Send + Sync {
    /// All work items of a project.
    async fn list_works(
        &self,
        token: &AuthToken,
        project: &ProjectId,
    ) -> Result<Vec<WorkItem>, WorkError>;

    async fn get_work(
        &self,
        token: &AuthToken,
        project: &ProjectId,
        work: &WorkId,
    ) -> Result<WorkItem, WorkError>;

    async fn create_work(
        &self,
        token: &AuthToken,
        project: &ProjectId,
        new: &NewWorkItem,
    ) -> Result<(), WorkError>;

    /// Change only the status of a work item. The response body is ignored.
    async fn update_status(
        &self,
        token: &AuthToken,
        project: &ProjectId,
        work: &WorkId,
        status: &WorkStatus,
    ) -> Result<(), WorkError>;

    async fn delete_work(
        &self,
        token: &AuthToken,
        project: &ProjectId,
        work: &WorkId,
    ) -> Result<(), WorkError>;

    async fn list_projects(&self, token: &AuthToken) -> Result<Vec<Project>, WorkError>;

    async fn get_project(
        &self,
        token: &AuthToken,
        project: &ProjectId,
    ) -> Result<ProjectDetails, WorkError>;

    async fn create_project(&self, token: &AuthToken, new: &NewProject) -> Result<(), WorkError>;

    /// Replace the name and description of a project.
    async fn update_project(
        &self,
        token: &AuthToken,
        project: &ProjectId,
        changes: &NewProject,
    ) -> Result<(), WorkError>;

    async fn delete_project(&self, token: &AuthToken, project: &ProjectId)
        -> Result<(), WorkError>;
}
