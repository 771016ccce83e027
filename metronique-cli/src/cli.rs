use clap::{Args, Parser, Subcommand};
use metronique::session::ViewMode;
use metronique::view::SortKey;
use metronique::{Priority, WorkStatus};

#[derive(Debug, Parser)]
#[command(name = "metronique")]
#[command(about = "Terminal client for Metronique projects and work items")]
pub struct Cli {
    /// Run against an in-memory demo backend instead of the API
    #[arg(long, global = true)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Store the API bearer token
    Login {
        /// Token value; prompted for without echo when omitted
        #[arg(long)]
        token: Option<String>,
    },
    /// Remove the stored token and selections
    Logout,
    /// Print config path and create default file if missing
    ConfigPath,
    /// List projects
    Projects,
    /// Create a project
    ProjectAdd {
        name: String,
        description: String,
    },
    /// Rename a project or change its description
    ProjectEdit {
        /// Project id, dashboard path or URL
        project: String,
        name: String,
        description: String,
    },
    /// Delete a project
    ProjectRemove { project: String },
    /// Select the current project by id, dashboard path or URL
    Use { project: String },
    /// Show the work items of the current project
    Works(WorksArgs),
    /// Show the kanban board of the current project
    Board(FilterArgs),
    /// Show chart statistics of the current project
    Stats(ProjectArg),
    /// Show one work item (defaults to the last selected one)
    Show {
        work_id: Option<String>,
        #[command(flatten)]
        project: ProjectArg,
    },
    /// Create a work item
    Add(AddArgs),
    /// Change the status of a work item
    Status {
        work_id: String,
        /// TODO, in-progress, completed, on-hold or removed
        #[arg(value_parser = str::parse::<WorkStatus>)]
        status: WorkStatus,
        #[command(flatten)]
        project: ProjectArg,
    },
    /// Delete a work item
    Remove {
        work_id: String,
        #[command(flatten)]
        project: ProjectArg,
    },
    /// Set the default view for `works`
    View { mode: ViewMode },
}

#[derive(Debug, Clone, Default, Args)]
pub struct ProjectArg {
    /// Project id, dashboard path or URL; defaults to the current project
    #[arg(long, short = 'p')]
    pub project: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    #[command(flatten)]
    pub project: ProjectArg,
    /// Case-insensitive text matched against type and description
    #[arg(long, short = 's', default_value = "")]
    pub search: String,
    #[arg(long, value_parser = str::parse::<Priority>)]
    pub priority: Option<Priority>,
    /// Exact work type (case-insensitive)
    #[arg(long = "type")]
    pub work_type: Option<String>,
    #[arg(long, value_parser = str::parse::<WorkStatus>)]
    pub status: Option<WorkStatus>,
    /// Required tag; repeat for several
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    /// Only items starting on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,
    /// Only items ending on or before this date (YYYY-MM-DD)
    #[arg(long)]
    pub until: Option<String>,
    /// Only items with (true) or without (false) links
    #[arg(long)]
    pub has_link: Option<bool>,
    /// Only items with (true) or without (false) attachments
    #[arg(long)]
    pub has_files: Option<bool>,
}

#[derive(Debug, Clone, Args)]
pub struct WorksArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
    /// Sort column: id, workType, workDesc, startDate, endDate, status, priority
    #[arg(long)]
    pub sort: Option<SortKey>,
    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,
    /// Override the saved view mode
    #[arg(long)]
    pub view: Option<ViewMode>,
}

#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    #[command(flatten)]
    pub project: ProjectArg,
    #[arg(long = "type")]
    pub work_type: String,
    #[arg(long = "desc")]
    pub work_desc: String,
    #[arg(long, default_value = "TODO", value_parser = str::parse::<WorkStatus>)]
    pub status: WorkStatus,
    #[arg(long, default_value = "Medium", value_parser = str::parse::<Priority>)]
    pub priority: Priority,
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    #[arg(long = "link")]
    pub links: Vec<String>,
    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,
    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_works_with_filters_and_sort() {
        let cli = Cli::try_parse_from([
            "metronique",
            "works",
            "--search",
            "bug",
            "--priority",
            "high",
            "--tag",
            "UI",
            "--sort",
            "startDate",
            "--desc",
        ])
        .expect("parse");

        let Commands::Works(args) = cli.command else {
            panic!("expected works command");
        };
        assert_eq!(args.filter.search, "bug");
        assert_eq!(args.filter.priority, Some(Priority::High));
        assert_eq!(args.filter.tags, vec!["UI".to_string()]);
        assert_eq!(args.sort, Some(SortKey::StartDate));
        assert!(args.desc);
    }

    #[test]
    fn parses_status_change() {
        let cli = Cli::try_parse_from(["metronique", "status", "w1", "on-hold", "-p", "p1"])
            .expect("parse");

        let Commands::Status {
            work_id,
            status,
            project,
        } = cli.command
        else {
            panic!("expected status command");
        };
        assert_eq!(work_id, "w1");
        assert_eq!(status, WorkStatus::OnHold);
        assert_eq!(project.project.as_deref(), Some("p1"));
    }

    #[test]
    fn rejects_unknown_status() {
        assert!(Cli::try_parse_from(["metronique", "status", "w1", "pending"]).is_err());
    }
}
