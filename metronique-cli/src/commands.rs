use anyhow::{anyhow, bail, Context, Result};
use metronique::api::WorkApi;
use metronique::routing::project_id_from_path;
use metronique::session::{AuthToken, ClientStateStore, Session, StateKey, ViewMode};
use metronique::view::{AdvancedFilter, SortConfig, SortDirection, WorkFilter, WorkQuery};
use metronique::{
    LoadState, NewProject, NewWorkItem, ProjectId, WorkBoard, WorkError, WorkId,
};
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use tracing::debug;

use crate::cli::{AddArgs, Commands, FilterArgs, ProjectArg, WorksArgs};
use crate::config::MetroniqueConfig;
use crate::render;

/// Execute one subcommand and return what should be printed.
pub async fn run<A, S>(api: A, state: &mut S, command: Commands) -> Result<String>
where
    A: WorkApi + Clone,
    S: ClientStateStore,
{
    match command {
        Commands::Login { token } => login(state, token),
        Commands::Logout => {
            for key in StateKey::ALL {
                state.remove(key)?;
            }
            Ok("Logged out. Local state cleared.\n".to_string())
        }
        Commands::ConfigPath => {
            let path = MetroniqueConfig::config_path()?;
            let created = MetroniqueConfig::ensure_exists(&path)?;
            let mut out = format!("{}\n", path.display());
            if created {
                out.push_str("Created default config.\n");
            }
            Ok(out)
        }
        Commands::Projects => {
            let session = state.session()?;
            let projects = api.list_projects(session.require_token()?).await?;
            Ok(render::projects(&projects))
        }
        Commands::ProjectAdd { name, description } => {
            let new = NewProject::new(name, description);
            new.validate()?;
            let session = state.session()?;
            api.create_project(session.require_token()?, &new).await?;
            Ok(format!("Created project '{}'.\n", new.project_name))
        }
        Commands::ProjectEdit {
            project,
            name,
            description,
        } => {
            let id = parse_project(&project)?;
            let changes = NewProject::new(name, description);
            changes.validate()?;
            let session = state.session()?;
            api.update_project(session.require_token()?, &id, &changes).await?;
            Ok(format!("Updated project {id}.\n"))
        }
        Commands::ProjectRemove { project } => {
            let id = parse_project(&project)?;
            let session = state.session()?;
            api.delete_project(session.require_token()?, &id).await?;
            if state.load_current_project()?.as_ref() == Some(&id) {
                state.remove(StateKey::CurrentProject)?;
            }
            Ok(format!("Deleted project {id}.\n"))
        }
        Commands::Use { project } => {
            let id = parse_project(&project)?;
            state.save_current_project(&id)?;
            Ok(format!("Current project: {id}\n"))
        }
        Commands::Works(args) => works(api, state, args).await,
        Commands::Board(filter) => {
            let query = query(&filter, SortConfig::default())?;
            let board = load_board(api, state, &filter.project).await?;
            Ok(render::kanban(&board.columns(&query)))
        }
        Commands::Stats(project) => {
            let board = load_board(api, state, &project).await?;
            Ok(render::stats(&board.stats()))
        }
        Commands::Show { work_id, project } => {
            let id = match work_id {
                Some(id) => WorkId::from(id),
                None => state
                    .load_selected_work()?
                    .ok_or_else(|| anyhow!("No work item selected, pass a work id"))?,
            };
            let session = session_for(state, &project)?;
            let item = api
                .get_work(session.require_token()?, session.require_project()?, &id)
                .await?;
            state.save_selected_work(&id)?;
            Ok(render::detail(&item))
        }
        Commands::Add(args) => add(api, state, args).await,
        Commands::Status {
            work_id,
            status,
            project,
        } => {
            let id = WorkId::from(work_id);
            let mut board = load_board(api, state, &project).await?;
            board.work(&id)?;
            if board.move_to_column(&id, status.clone()).await? {
                Ok(format!("{id} moved to {status}.\n"))
            } else {
                Ok(format!("{id} is already {status}.\n"))
            }
        }
        Commands::Remove { work_id, project } => {
            let id = WorkId::from(work_id);
            let mut board = load_board(api, state, &project).await?;
            board.work(&id)?;
            board.delete_work(&id).await?;
            if state.load_selected_work()?.as_ref() == Some(&id) {
                state.remove(StateKey::SelectedWorkId)?;
            }
            Ok(format!("Deleted {id}.\n"))
        }
        Commands::View { mode } => {
            state.save_view_mode(mode)?;
            Ok(format!("Default view: {mode}\n"))
        }
    }
}

fn login<S: ClientStateStore>(state: &mut S, token: Option<String>) -> Result<String> {
    let token = match token {
        Some(token) => token,
        None => rpassword::prompt_password("API token: ").context("Failed to read token")?,
    };
    let token = token.trim();
    if token.is_empty() {
        bail!("Token must not be empty");
    }

    state.save_token(&AuthToken::new(token))?;
    Ok("Token saved.\n".to_string())
}

async fn works<A, S>(api: A, state: &mut S, args: WorksArgs) -> Result<String>
where
    A: WorkApi + Clone,
    S: ClientStateStore,
{
    let direction = if args.desc {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };
    let sort = args
        .sort
        .map(|key| SortConfig::by(key, direction))
        .unwrap_or_default();
    let query = query(&args.filter, sort)?;
    let mode = match args.view {
        Some(mode) => mode,
        None => state.load_view_mode()?,
    };

    let board = load_board(api, state, &args.filter.project).await?;
    Ok(match mode {
        ViewMode::Table => render::table(&board.visible(&query)),
        ViewMode::Card => render::cards(&board.visible(&query)),
        ViewMode::Kanban => render::kanban(&board.columns(&query)),
        ViewMode::Chart => render::stats(&board.stats()),
    })
}

async fn add<A, S>(api: A, state: &mut S, args: AddArgs) -> Result<String>
where
    A: WorkApi + Clone,
    S: ClientStateStore,
{
    let mut new = NewWorkItem::new(args.work_type, args.work_desc);
    new.status = args.status;
    new.priority = args.priority;
    new.tags = args.tags;
    new.work_link = args.links;
    new.start_date = args.start.as_deref().map(start_of_day).transpose()?;
    new.end_date = args.end.as_deref().map(end_of_day).transpose()?;

    let mut board = load_board(api, state, &args.project).await?;
    board.create_work(new).await?;
    Ok(match board.store().state() {
        LoadState::Failed(reason) => {
            format!("Work item created, but reloading the list failed: {reason}\n")
        }
        _ => format!(
            "Work item created. {} items in project.\n",
            board.items().len()
        ),
    })
}

fn parse_project(input: &str) -> Result<ProjectId, WorkError> {
    project_id_from_path(input).ok_or(WorkError::MissingProjectId)
}

/// Stored session, with the project replaced when one was passed explicitly.
fn session_for<S: ClientStateStore>(state: &S, project: &ProjectArg) -> Result<Session> {
    let mut session = state.session()?;
    if let Some(project) = &project.project {
        session.project = Some(parse_project(project)?);
    }
    Ok(session)
}

async fn load_board<A, S>(api: A, state: &S, project: &ProjectArg) -> Result<WorkBoard<A>>
where
    A: WorkApi + Clone,
    S: ClientStateStore,
{
    let session = session_for(state, project)?;
    if let Some(project) = &session.project {
        debug!("loading work items of project {}", project);
    }

    let mut board = WorkBoard::new(api, session);
    board.load().await?;
    Ok(board)
}

fn query(args: &FilterArgs, sort: SortConfig) -> Result<WorkQuery> {
    let mut advanced = AdvancedFilter {
        work_type: args.work_type.clone(),
        status: args.status.clone(),
        has_link: args.has_link,
        has_files: args.has_files,
        start_from: args.from.as_deref().map(start_of_day).transpose()?,
        end_until: args.until.as_deref().map(end_of_day).transpose()?,
        ..AdvancedFilter::default()
    };
    for tag in &args.tags {
        advanced.add_tag(tag);
    }

    Ok(WorkQuery {
        filter: WorkFilter::new(args.search.clone(), args.priority.clone()),
        advanced,
        sort,
    })
}

fn parse_date(value: &str) -> Result<Date> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]"))
        .with_context(|| format!("Invalid date '{value}', expected YYYY-MM-DD"))
}

fn start_of_day(value: &str) -> Result<OffsetDateTime> {
    Ok(parse_date(value)?.midnight().assume_utc())
}

fn end_of_day(value: &str) -> Result<OffsetDateTime> {
    Ok(parse_date(value)?.with_hms(23, 59, 59)?.assume_utc())
}
