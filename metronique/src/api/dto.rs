use serde::{Deserialize, Serialize};

use crate::domain::null_as_default;
use crate::{Project, ProjectDetails, WorkItem, WorkStatus};

#[derive(Deserialize)]
pub struct WorksResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub works: Vec<WorkItem>,
}

#[derive(Deserialize)]
pub struct ProjectsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub projects: Vec<Project>,
}

/// `GET /project/{id}` answers either `{project, works}` or the bare project.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum ProjectResponse {
    Wrapped {
        project: Project,
        #[serde(default)]
        works: Vec<WorkItem>,
    },
    Bare(Project),
}

impl From<ProjectResponse> for ProjectDetails {
    fn from(response: ProjectResponse) -> Self {
        match response {
            ProjectResponse::Wrapped { project, works } => Self { project, works },
            ProjectResponse::Bare(project) => Self {
                project,
                works: Vec::new(),
            },
        }
    }
}

/// `GET /work/{project}/{work}` answers either `{work}` or the bare item.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum WorkResponse {
    Wrapped { work: WorkItem },
    Bare(WorkItem),
}

impl From<WorkResponse> for WorkItem {
    fn from(response: WorkResponse) -> Self {
        match response {
            WorkResponse::Wrapped { work } => work,
            WorkResponse::Bare(work) => work,
        }
    }
}

#[derive(Serialize)]
pub struct UpdateStatusRequest<'a> {
    pub status: &'a WorkStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_lists_and_fields_decode() {
        let works: WorksResponse = serde_json::from_str(r#"{"works": null}"#).expect("null works");
        let projects: ProjectsResponse =
            serde_json::from_str(r#"{"projects": null}"#).expect("null projects");
        let items: WorksResponse = serde_json::from_str(
            r#"{"works": [{"_id": "w1", "workDesc": "x", "tags": null, "workLink": null}]}"#,
        )
        .expect("null item fields");

        assert!(works.works.is_empty());
        assert!(projects.projects.is_empty());
        assert!(items.works[0].tags.is_empty());
        assert!(items.works[0].work_link.is_empty());
    }

    #[test]
    fn project_response_normalizes_both_shapes() {
        let wrapped: ProjectResponse = serde_json::from_str(
            r#"{"project": {"_id": "p1", "projectName": "Site"},
                "works": [{"_id": "w1", "workDesc": "x"}]}"#,
        )
        .expect("wrapped shape");
        let bare: ProjectResponse =
            serde_json::from_str(r#"{"_id": "p1", "projectName": "Site", "projectDesc": "d"}"#)
                .expect("bare shape");

        let wrapped = ProjectDetails::from(wrapped);
        let bare = ProjectDetails::from(bare);

        assert_eq!(wrapped.project.id.as_str(), "p1");
        assert_eq!(wrapped.works.len(), 1);
        assert_eq!(bare.project.project_desc, "d");
        assert!(bare.works.is_empty());
    }

    #[test]
    fn works_response_defaults_to_empty() {
        let response: WorksResponse = serde_json::from_str("{}").expect("empty body");
        assert!(response.works.is_empty());
    }

    #[test]
    fn update_status_body_carries_only_status() {
        let body = serde_json::to_string(&UpdateStatusRequest {
            status: &WorkStatus::OnHold,
        })
        .expect("serialize");
        assert_eq!(body, r#"{"status":"On Hold"}"#);
    }
}
