//! Orchestrator error types.

use thiserror::Error;

/// Keyword rejected before any service call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a keyword")]
    EmptyKeyword,
}

/// Errors surfaced to callers of orchestrator handlers.
///
/// The orchestrator has already recorded the user-facing consequence (a
/// notice) by the time one of these is returned.
#[derive(Error, Debug)]
pub enum OrchestratorError {
    /// Auth service error
    #[error(transparent)]
    Auth(#[from] explorer_auth::AuthError),

    /// Storage error
    #[error(transparent)]
    Storage(#[from] explorer_storage::StorageError),

    /// Handler called in a session phase that does not allow it
    #[error("Invalid session transition: {0}")]
    InvalidTransition(String),
}

/// Result type alias using OrchestratorError.
pub type OrchestratorResult<T> = Result<T, OrchestratorError>;
