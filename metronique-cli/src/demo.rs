//! Seed data for `--dev`, served by the in-memory backend.

use metronique::api::InMemoryWorkApi;
use metronique::{Priority, Project, ProjectId, WorkId, WorkItem, WorkStatus};
use time::macros::datetime;
use time::OffsetDateTime;

pub const DEMO_TOKEN: &str = "dev-token";
pub const DEMO_PROJECT: &str = "demo-site";

fn work(
    id: &str,
    work_type: &str,
    work_desc: &str,
    status: WorkStatus,
    priority: Priority,
    start: Option<OffsetDateTime>,
    end: Option<OffsetDateTime>,
) -> WorkItem {
    WorkItem {
        id: WorkId::from(id),
        work_type: work_type.to_string(),
        work_desc: work_desc.to_string(),
        status,
        priority,
        tags: Vec::new(),
        start_date: start,
        end_date: end,
        work_link: Vec::new(),
        work_files: Vec::new(),
        project: Some(ProjectId::from(DEMO_PROJECT)),
    }
}

fn demo_works() -> Vec<WorkItem> {
    let mut landing = work(
        "w-101",
        "Design",
        "Landing page mockups",
        WorkStatus::Completed,
        Priority::High,
        Some(datetime!(2025-03-01 09:00 UTC)),
        Some(datetime!(2025-03-07 17:00 UTC)),
    );
    landing.tags = vec!["UI".to_string()];
    landing.work_link = vec!["https://example.com/figma/landing".to_string()];

    let mut login = work(
        "w-102",
        "Development",
        "Fix bug in login form",
        WorkStatus::InProgress,
        Priority::Critical,
        Some(datetime!(2025-03-03 09:00 UTC)),
        None,
    );
    login.tags = vec!["Bug".to_string(), "Auth".to_string()];

    vec![
        landing,
        login,
        work(
            "w-103",
            "Testing",
            "Regression suite for checkout",
            WorkStatus::Todo,
            Priority::Medium,
            Some(datetime!(2025-03-10 09:00 UTC)),
            Some(datetime!(2025-03-14 17:00 UTC)),
        ),
        work(
            "w-104",
            "Development",
            "Migrate image storage",
            WorkStatus::OnHold,
            Priority::Low,
            None,
            None,
        ),
        work(
            "w-105",
            "Documentation",
            "Write release notes",
            WorkStatus::Other("Pending".to_string()),
            Priority::Medium,
            Some(datetime!(2025-03-03 12:00 UTC)),
            None,
        ),
    ]
}

/// Backend preloaded with one project that accepts [`DEMO_TOKEN`] only.
pub fn backend() -> InMemoryWorkApi {
    InMemoryWorkApi::new()
        .with_project(
            Project {
                id: ProjectId::from(DEMO_PROJECT),
                project_name: "Website relaunch".to_string(),
                project_desc: "Demo project served from memory".to_string(),
                created_at: Some(datetime!(2025-02-20 08:00 UTC)),
            },
            demo_works(),
        )
        .with_required_token(DEMO_TOKEN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use metronique::api::WorkApi;
    use metronique::session::AuthToken;

    #[tokio::test]
    async fn demo_project_is_served() {
        let api = backend();
        let works = api
            .list_works(&AuthToken::new(DEMO_TOKEN), &ProjectId::from(DEMO_PROJECT))
            .await
            .expect("list");

        assert_eq!(works.len(), 5);
        assert!(works.iter().any(|w| !w.status.is_known()));
    }
}
