use thiserror::Error;

/// Errors surfaced by the work item pipeline.
///
/// Every variant renders as a single human-readable message; callers
/// display it as-is and never retry automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkError {
    #[error("Project ID not found")]
    MissingProjectId,
    #[error("Token not found in client state")]
    MissingToken,
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Failed to parse response: {0}")]
    Parsing(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Work item not found: {0}")]
    NotFound(String),
    #[error("Client state error: {0}")]
    Storage(String),
}

impl WorkError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// True for failures reported by the backend as 401/403.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status: 401 | 403 })
    }
}
