use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

use super::{ProjectId, WorkId};
use crate::WorkError;

/// A single trackable unit of project work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    #[serde(rename = "_id", alias = "id")]
    pub id: WorkId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub work_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub work_desc: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: WorkStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: Priority,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub start_date: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub end_date: Option<OffsetDateTime>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub work_link: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub work_files: Vec<WorkFile>,
    #[serde(default)]
    pub project: Option<ProjectId>,
}

/// Treat an explicit JSON `null` like a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl WorkItem {
    /// Case-insensitive substring match on `workType` or `workDesc`.
    ///
    /// `needle` must already be lower-cased; an empty needle matches everything.
    pub(crate) fn contains_text(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.work_type.to_lowercase().contains(needle)
            || self.work_desc.to_lowercase().contains(needle)
    }

    pub fn has_link(&self) -> bool {
        self.work_link.iter().any(|link| !link.trim().is_empty())
    }

    pub fn has_files(&self) -> bool {
        !self.work_files.is_empty()
    }
}

/// An attachment reference on a work item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkFile {
    pub file_name: String,
    pub file_url: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub uploaded_at: Option<OffsetDateTime>,
}

/// Board status of a work item.
///
/// The five known values are the kanban columns. Anything else the backend
/// sends (e.g. the legacy "Pending") is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WorkStatus {
    #[default]
    Todo,
    InProgress,
    Completed,
    OnHold,
    Removed,
    Other(String),
}

impl WorkStatus {
    /// Known statuses in board column order.
    pub const KNOWN: [WorkStatus; 5] = [
        WorkStatus::Todo,
        WorkStatus::InProgress,
        WorkStatus::Completed,
        WorkStatus::OnHold,
        WorkStatus::Removed,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Todo => "TODO",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::OnHold => "On Hold",
            Self::Removed => "Removed",
            Self::Other(other) => other,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Position of the status among the board columns, `None` when unknown.
    pub fn board_index(&self) -> Option<usize> {
        Self::KNOWN.iter().position(|known| known == self)
    }
}

impl From<String> for WorkStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "TODO" => Self::Todo,
            "In Progress" => Self::InProgress,
            "Completed" => Self::Completed,
            "On Hold" => Self::OnHold,
            "Removed" => Self::Removed,
            _ => Self::Other(value),
        }
    }
}

impl From<WorkStatus> for String {
    fn from(value: WorkStatus) -> Self {
        match value {
            WorkStatus::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

/// Parses user input. Only the five known statuses are accepted.
impl FromStr for WorkStatus {
    type Err = WorkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "todo" | "to do" => Ok(Self::Todo),
            "in progress" | "inprogress" => Ok(Self::InProgress),
            "completed" | "done" => Ok(Self::Completed),
            "on hold" | "onhold" => Ok(Self::OnHold),
            "removed" => Ok(Self::Removed),
            _ => Err(WorkError::invalid(format!("unknown status '{}'", s.trim()))),
        }
    }
}

impl std::fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Priority of a work item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
    Other(String),
}

impl Priority {
    pub const KNOWN: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Critical,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
            Self::Other(other) => other,
        }
    }

    /// Severity rank (higher is more urgent), `None` for unrecognized values.
    pub fn rank(&self) -> Option<u8> {
        match self {
            Self::Low => Some(1),
            Self::Medium => Some(2),
            Self::High => Some(3),
            Self::Critical => Some(4),
            Self::Other(_) => None,
        }
    }
}

impl From<String> for Priority {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Low" => Self::Low,
            "Medium" => Self::Medium,
            "High" => Self::High,
            "Critical" => Self::Critical,
            _ => Self::Other(value),
        }
    }
}

impl From<Priority> for String {
    fn from(value: Priority) -> Self {
        match value {
            Priority::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for Priority {
    type Err = WorkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(WorkError::invalid(format!("unknown priority '{}'", s.trim()))),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Partial update applied to a stored work item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkPatch {
    pub status: Option<WorkStatus>,
    pub priority: Option<Priority>,
}

impl WorkPatch {
    pub fn status(status: WorkStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn apply(&self, item: &mut WorkItem) {
        if let Some(status) = &self.status {
            item.status = status.clone();
        }
        if let Some(priority) = &self.priority {
            item.priority = priority.clone();
        }
    }
}
