//! Resolution of a project id from a dashboard path or URL.
//!
//! The pipeline itself never reads locations; front-ends that are handed a
//! path resolve it here once and pass the resulting [`ProjectId`] along.

use url::Url;

use crate::ProjectId;

const PROJECTS_SEGMENT: &str = "projects";

/// Resolve the project id from a path such as `/app/projects/68b9/work`.
///
/// The segment following `projects` wins. Without one, the last non-empty
/// segment is used. Query strings and fragments are ignored.
pub fn project_id_from_path(input: &str) -> Option<ProjectId> {
    let path = match Url::parse(input) {
        Ok(url) if url.has_host() => url.path().to_string(),
        _ => input.split(['?', '#']).next().unwrap_or_default().to_string(),
    };

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    if let Some(index) = segments.iter().position(|s| *s == PROJECTS_SEGMENT) {
        return segments.get(index + 1).map(|id| ProjectId::from(*id));
    }

    segments.last().map(|id| ProjectId::from(*id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_after_projects_wins() {
        assert_eq!(
            project_id_from_path("/app/projects/68b9/sub-work"),
            Some(ProjectId::from("68b9"))
        );
    }

    #[test]
    fn falls_back_to_last_segment() {
        assert_eq!(project_id_from_path("/work/68b9/"), Some(ProjectId::from("68b9")));
        assert_eq!(project_id_from_path("68b9"), Some(ProjectId::from("68b9")));
    }

    #[test]
    fn full_url_with_query_is_accepted() {
        assert_eq!(
            project_id_from_path("http://localhost:3000/app/projects/abc?view=kanban#top"),
            Some(ProjectId::from("abc"))
        );
        assert_eq!(
            project_id_from_path("https://board.example.com/work/68b9?tab=files"),
            Some(ProjectId::from("68b9"))
        );
    }

    #[test]
    fn host_without_scheme_is_read_as_a_path() {
        assert_eq!(
            project_id_from_path("localhost:3000/app/projects/abc/work"),
            Some(ProjectId::from("abc"))
        );
    }

    #[test]
    fn missing_id_yields_none() {
        assert_eq!(project_id_from_path(""), None);
        assert_eq!(project_id_from_path("/"), None);
        assert_eq!(project_id_from_path("/app/projects/"), None);
        assert_eq!(project_id_from_path("http://localhost:3000"), None);
    }
}
