use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::dto::{
    ProjectResponse, ProjectsResponse, UpdateStatusRequest, WorkResponse, WorksResponse,
};
use super::WorkApi;
use crate::session::AuthToken;
use crate::{
    NewProject, NewWorkItem, Project, ProjectDetails, ProjectId, WorkError, WorkId, WorkItem,
    WorkStatus,
};

const WORK_PATH: &str = "api/v1/work";
const PROJECT_PATH: &str = "api/v1/project";

/// [`WorkApi`] over HTTP with bearer authentication.
///
/// One request per call: no retries, no token refresh, no timeouts beyond
/// what the underlying client enforces.
#[derive(Debug, Clone)]
pub struct HttpWorkApi {
    client: Client,
    base_url: Url,
}

impl HttpWorkApi {
    pub fn new(base_url: &str) -> Result<Self, WorkError> {
        let base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))
            .map_err(|e| WorkError::invalid(format!("invalid API URL {base_url}: {e}")))?;
        let client = Client::builder()
            .build()
            .map_err(|e| WorkError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Join percent-encoded `segments` onto `base`, keeping a trailing slash
    /// when `trailing_slash` is set.
    fn endpoint(
        &self,
        base: &str,
        segments: &[&str],
        trailing_slash: bool,
    ) -> Result<Url, WorkError> {
        let mut path = base.to_string();
        for segment in segments {
            path.push('/');
            path.push_str(&urlencoding::encode(segment));
        }
        if trailing_slash {
            path.push('/');
        }

        self.base_url
            .join(&path)
            .map_err(|e| WorkError::invalid(format!("failed to build URL for {path}: {e}")))
    }

    async fn send(
        &self,
        request: RequestBuilder,
        token: &AuthToken,
        call_name: &str,
    ) -> Result<Response, WorkError> {
        debug!("calling {}", call_name);

        let response = request
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(|e| WorkError::Network(format!("{call_name}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            debug!("{} returned {}", call_name, status);
            return Err(WorkError::Http {
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        token: &AuthToken,
        call_name: &str,
    ) -> Result<T, WorkError> {
        let response = self.send(request, token, call_name).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| WorkError::Parsing(format!("{call_name}: {e}")))
    }

    async fn send_without_body(
        &self,
        request: RequestBuilder,
        token: &AuthToken,
        call_name: &str,
    ) -> Result<(), WorkError> {
        let response = self.send(request, token, call_name).await?;
        let _ = response.bytes().await;
        Ok(())
    }
}

#[async_trait]
impl WorkApi for HttpWorkApi {
    async fn list_works(
        &self,
        token: &AuthToken,
        project: &ProjectId,
    ) -> Result<Vec<WorkItem>, WorkError> {
        let url = self.endpoint(WORK_PATH, &[project.as_str()], false)?;
        let response: WorksResponse = self
            .get_json(self.client.get(url), token, "GET /work/:project")
            .await?;

        Ok(response.works)
    }

    async fn get_work(
        &self,
        token: &AuthToken,
        project: &ProjectId,
        work: &WorkId,
    ) -> Result<WorkItem, WorkError> {
        let url = self.endpoint(WORK_PATH, &[project.as_str(), work.as_str()], false)?;
        let response: WorkResponse = self
            .get_json(self.client.get(url), token, "GET /work/:project/:work")
            .await?;

        Ok(response.into())
    }

    async fn create_work(
        &self,
        token: &AuthToken,
        project: &ProjectId,
        new: &NewWorkItem,
    ) -> Result<(), WorkError> {
        let url = self.endpoint(WORK_PATH, &[project.as_str()], false)?;
        self.send_without_body(self.client.post(url).json(new), token, "POST /work/:project")
            .await
    }

    async fn update_status(
        &self,
        token: &AuthToken,
        project: &ProjectId,
        work: &WorkId,
        status: &WorkStatus,
    ) -> Result<(), WorkError> {
        let url = self.endpoint(WORK_PATH, &[project.as_str(), work.as_str()], false)?;
        self.send_without_body(
            self.client.put(url).json(&UpdateStatusRequest { status }),
            token,
            "PUT /work/:project/:work",
        )
        .await
    }

    async fn delete_work(
        &self,
        token: &AuthToken,
        project: &ProjectId,
        work: &WorkId,
    ) -> Result<(), WorkError> {
        let url = self.endpoint(WORK_PATH, &[project.as_str(), work.as_str()], false)?;
        self.send_without_body(self.client.delete(url), token, "DELETE /work/:project/:work")
            .await
    }

    async fn list_projects(&self, token: &AuthToken) -> Result<Vec<Project>, WorkError> {
        let url = self.endpoint(PROJECT_PATH, &[], true)?;
        let response: ProjectsResponse = self
            .get_json(self.client.get(url), token, "GET /project/")
            .await?;

        Ok(response.projects)
    }

    async fn get_project(
        &self,
        token: &AuthToken,
        project: &ProjectId,
    ) -> Result<ProjectDetails, WorkError> {
        let url = self.endpoint(PROJECT_PATH, &[project.as_str()], false)?;
        let response: ProjectResponse = self
            .get_json(self.client.get(url), token, "GET /project/:project")
            .await?;

        Ok(response.into())
    }

    async fn create_project(&self, token: &AuthToken, new: &NewProject) -> Result<(), WorkError> {
        let url = self.endpoint(PROJECT_PATH, &[], true)?;
        self.send_without_body(self.client.post(url).json(new), token, "POST /project/")
            .await
    }

    async fn update_project(
        &self,
        token: &AuthToken,
        project: &ProjectId,
        changes: &NewProject,
    ) -> Result<(), WorkError> {
        let url = self.endpoint(PROJECT_PATH, &[project.as_str()], false)?;
        self.send_without_body(
            self.client.put(url).json(changes),
            token,
            "PUT /project/:project",
        )
        .await
    }

    async fn delete_project(
        &self,
        token: &AuthToken,
        project: &ProjectId,
    ) -> Result<(), WorkError> {
        let url = self.endpoint(PROJECT_PATH, &[project.as_str()], false)?;
        self.send_without_body(self.client.delete(url), token, "DELETE /project/:project")
            .await
    }
}
