use serde::Serialize;
use time::OffsetDateTime;

use super::{Priority, ProjectId, WorkFile, WorkStatus};
use crate::WorkError;

/// Creation payload for a work item (everything but the backend-assigned id).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkItem {
    pub work_type: String,
    pub work_desc: String,
    pub status: WorkStatus,
    pub priority: Priority,
    pub tags: Vec<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub start_date: Option<OffsetDateTime>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub end_date: Option<OffsetDateTime>,
    pub work_link: Vec<String>,
    pub work_files: Vec<WorkFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectId>,
}

impl NewWorkItem {
    pub fn new(work_type: impl Into<String>, work_desc: impl Into<String>) -> Self {
        Self {
            work_type: work_type.into(),
            work_desc: work_desc.into(),
            status: WorkStatus::Todo,
            priority: Priority::Medium,
            tags: Vec::new(),
            start_date: None,
            end_date: None,
            work_link: Vec::new(),
            work_files: Vec::new(),
            project: None,
        }
    }

    pub fn validate(&self) -> Result<(), WorkError> {
        if self.work_type.trim().is_empty() {
            return Err(WorkError::invalid("workType is required"));
        }
        if self.work_desc.trim().is_empty() {
            return Err(WorkError::invalid("workDesc is required"));
        }
        Ok(())
    }

    /// Strip form leftovers: blank link placeholders, blank or repeated tags.
    pub fn cleaned(mut self) -> Self {
        self.work_type = self.work_type.trim().to_string();
        self.work_desc = self.work_desc.trim().to_string();

        self.work_link = self
            .work_link
            .into_iter()
            .map(|link| link.trim().to_string())
            .filter(|link| !link.is_empty())
            .collect();

        let mut tags: Vec<String> = Vec::with_capacity(self.tags.len());
        for tag in self.tags {
            let tag = tag.trim();
            if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
        }
        self.tags = tags;

        self
    }

    pub fn for_project(self, project: ProjectId) -> Self {
        Self {
            project: Some(project),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleaned_drops_placeholders_and_duplicate_tags() {
        let mut new = NewWorkItem::new(" Design ", "Landing page");
        new.work_link = vec!["".into(), " https://figma.com/x ".into(), "   ".into()];
        new.tags = vec!["UI".into(), " UI ".into(), "".into(), "Frontend".into()];

        let cleaned = new.cleaned();

        assert_eq!(cleaned.work_type, "Design");
        assert_eq!(cleaned.work_link, vec!["https://figma.com/x".to_string()]);
        assert_eq!(cleaned.tags, vec!["UI".to_string(), "Frontend".to_string()]);
    }

    #[test]
    fn validate_requires_type_and_description() {
        assert!(NewWorkItem::new("Design", "x").validate().is_ok());
        assert_eq!(
            NewWorkItem::new("", "x").validate(),
            Err(WorkError::invalid("workType is required"))
        );
        assert!(NewWorkItem::new("Design", "   ").validate().is_err());
    }

    #[test]
    fn payload_serializes_without_empty_optionals() {
        let new = NewWorkItem::new("Design", "x").for_project(ProjectId::from("p1"));
        let json = serde_json::to_value(&new).expect("serialize");

        assert_eq!(json["workType"], "Design");
        assert_eq!(json["status"], "TODO");
        assert_eq!(json["priority"], "Medium");
        assert_eq!(json["project"], "p1");
        assert!(json.get("startDate").is_none());
    }
}
