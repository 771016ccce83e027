//! Explicit client context and the single adapter for persisted client state.

use std::collections::HashMap;
use std::fmt;

use strum::{Display, EnumString};

use crate::{ProjectId, WorkError, WorkId};

/// Bearer token presented on every backend call.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Context the pipeline needs to reach the backend.
///
/// Both values are checked on every operation, never cached elsewhere.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub token: Option<AuthToken>,
    pub project: Option<ProjectId>,
}

impl Session {
    pub fn new(token: Option<AuthToken>, project: Option<ProjectId>) -> Self {
        Self { token, project }
    }

    pub fn require_token(&self) -> Result<&AuthToken, WorkError> {
        self.token.as_ref().ok_or(WorkError::MissingToken)
    }

    pub fn require_project(&self) -> Result<&ProjectId, WorkError> {
        self.project.as_ref().ok_or(WorkError::MissingProjectId)
    }
}

/// How the work items of a project are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ViewMode {
    #[default]
    Chart,
    Card,
    Table,
    Kanban,
}

/// Keys of the persisted client state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKey {
    Token,
    SelectedView,
    SelectedWorkId,
    CurrentProject,
}

impl StateKey {
    pub const ALL: [StateKey; 4] = [
        StateKey::Token,
        StateKey::SelectedView,
        StateKey::SelectedWorkId,
        StateKey::CurrentProject,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Token => "token",
            Self::SelectedView => "selectedView",
            Self::SelectedWorkId => "selectedWorkId",
            Self::CurrentProject => "currentProject",
        }
    }
}

/// Persisted client state (token, view mode, selections).
///
/// Implementors only provide raw key/value access; typed accessors are
/// shared so every front-end reads and writes the same keys the same way.
pub trait ClientStateStore {
    fn get(&self, key: StateKey) -> Result<Option<String>, WorkError>;

    fn set(&mut self, key: StateKey, value: &str) -> Result<(), WorkError>;

    fn remove(&mut self, key: StateKey) -> Result<(), WorkError>;

    fn load_token(&self) -> Result<Option<AuthToken>, WorkError> {
        Ok(self.get(StateKey::Token)?.map(AuthToken::new))
    }

    fn save_token(&mut self, token: &AuthToken) -> Result<(), WorkError> {
        self.set(StateKey::Token, token.as_str())
    }

    fn clear_token(&mut self) -> Result<(), WorkError> {
        self.remove(StateKey::Token)
    }

    /// Saved view mode; unreadable values fall back to the default view.
    fn load_view_mode(&self) -> Result<ViewMode, WorkError> {
        Ok(self
            .get(StateKey::SelectedView)?
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default())
    }

    fn save_view_mode(&mut self, mode: ViewMode) -> Result<(), WorkError> {
        self.set(StateKey::SelectedView, &mode.to_string())
    }

    fn load_selected_work(&self) -> Result<Option<WorkId>, WorkError> {
        Ok(self.get(StateKey::SelectedWorkId)?.map(WorkId::from))
    }

    fn save_selected_work(&mut self, id: &WorkId) -> Result<(), WorkError> {
        self.set(StateKey::SelectedWorkId, id.as_str())
    }

    fn load_current_project(&self) -> Result<Option<ProjectId>, WorkError> {
        Ok(self.get(StateKey::CurrentProject)?.map(ProjectId::from))
    }

    fn save_current_project(&mut self, id: &ProjectId) -> Result<(), WorkError> {
        self.set(StateKey::CurrentProject, id.as_str())
    }

    /// Build a session from the stored token and current project.
    fn session(&self) -> Result<Session, WorkError> {
        Ok(Session::new(self.load_token()?, self.load_current_project()?))
    }
}

/// [`ClientStateStore`] that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStateStore {
    values: HashMap<StateKey, String>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClientStateStore for MemoryStateStore {
    fn get(&self, key: StateKey) -> Result<Option<String>, WorkError> {
        Ok(self.values.get(&key).cloned())
    }

    fn set(&mut self, key: StateKey, value: &str) -> Result<(), WorkError> {
        self.values.insert(key, value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: StateKey) -> Result<(), WorkError> {
        self.values.remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_reports_missing_context() {
        let session = Session::default();
        assert_eq!(session.require_token().unwrap_err(), WorkError::MissingToken);
        assert_eq!(
            session.require_project().unwrap_err(),
            WorkError::MissingProjectId
        );
    }

    #[test]
    fn token_debug_output_is_redacted() {
        let token = AuthToken::new("secret");
        assert_eq!(format!("{token:?}"), "AuthToken(***)");
    }

    #[test]
    fn view_mode_parses_case_insensitively() {
        assert_eq!("Kanban".parse::<ViewMode>(), Ok(ViewMode::Kanban));
        assert_eq!(ViewMode::Table.to_string(), "table");
        assert!("grid".parse::<ViewMode>().is_err());
    }

    #[test]
    fn view_mode_defaults_to_chart_when_unset_or_garbage() {
        let mut store = MemoryStateStore::new();
        assert_eq!(store.load_view_mode(), Ok(ViewMode::Chart));

        store.set(StateKey::SelectedView, "grid").unwrap();
        assert_eq!(store.load_view_mode(), Ok(ViewMode::Chart));

        store.save_view_mode(ViewMode::Card).unwrap();
        assert_eq!(store.load_view_mode(), Ok(ViewMode::Card));
    }

    #[test]
    fn session_is_built_from_stored_values() {
        let mut store = MemoryStateStore::new();
        store.save_token(&AuthToken::new("t")).unwrap();
        store.save_current_project(&ProjectId::from("p1")).unwrap();

        let session = store.session().unwrap();
        assert_eq!(session.require_token().unwrap().as_str(), "t");
        assert_eq!(session.require_project().unwrap().as_str(), "p1");

        store.clear_token().unwrap();
        assert!(store.session().unwrap().token.is_none());
    }
}
