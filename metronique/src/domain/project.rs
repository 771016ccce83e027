use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::work_item::null_as_default;
use super::{ProjectId, WorkItem};
use crate::WorkError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id", alias = "id")]
    pub id: ProjectId,
    pub project_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub project_desc: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

/// A project together with its work items, normalized from whichever
/// response shape the backend returned.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDetails {
    pub project: Project,
    pub works: Vec<WorkItem>,
}

/// Creation payload for a project.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub project_name: String,
    pub project_desc: String,
}

impl NewProject {
    pub fn new(project_name: impl Into<String>, project_desc: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into().trim().to_string(),
            project_desc: project_desc.into().trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), WorkError> {
        if self.project_name.trim().is_empty() {
            return Err(WorkError::invalid("projectName is required"));
        }
        if self.project_desc.trim().is_empty() {
            return Err(WorkError::invalid("projectDesc is required"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_accepts_mongo_style_id() {
        let project: Project = serde_json::from_str(
            r#"{"_id": "68b9", "projectName": "Site", "projectDesc": "Relaunch",
                "createdAt": "2025-09-01T10:00:00Z"}"#,
        )
        .expect("deserialize project");

        assert_eq!(project.id.as_str(), "68b9");
        assert!(project.created_at.is_some());
    }

    #[test]
    fn null_description_reads_as_empty() {
        let project: Project =
            serde_json::from_str(r#"{"_id": "68b9", "projectName": "Site", "projectDesc": null}"#)
                .expect("deserialize project");

        assert_eq!(project.project_desc, "");
    }

    #[test]
    fn new_project_requires_name_and_description() {
        assert!(NewProject::new("Site", "Relaunch").validate().is_ok());
        assert!(NewProject::new("  ", "Relaunch").validate().is_err());
        assert!(NewProject::new("Site", "").validate().is_err());
    }
}
