//! Error taxonomy for the planner
//!
//! Every failure that can leave the planner carries a stable, machine-readable
//! reason (see [`PlannerError::reason`]) so callers can branch on it without
//! parsing messages.

use crate::planner::{ListId, TaskId, UserId};
use thiserror::Error;

/// Result alias used across the planner and its stores
pub type PlannerResult<T> = Result<T, PlannerError>;

#[derive(Debug, Error)]
pub enum PlannerError {
    /// Caller-supplied value that failed to parse or validate
    #[error("{0}")]
    InvalidInput(String),

    /// Missing or unknown credential, or access to another owner's data
    #[error("{0}")]
    Unauthorized(String),

    #[error("task '{0}' not found")]
    TaskNotFound(TaskId),

    #[error("list '{0}' not found")]
    ListNotFound(ListId),

    #[error("list '{0}' is the default list and cannot be deleted")]
    DefaultListProtected(ListId),

    #[error("list '{0}' is protected and cannot be deleted")]
    ProtectedList(ListId),

    #[error("list '{list}' belongs to another owner than '{owner}'")]
    CrossOwner { list: ListId, owner: UserId },

    #[error("list '{0}' already exists")]
    DuplicateList(ListId),

    /// I/O or (de)serialization failure in a persistent store
    #[error("storage failure: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl PlannerError {
    /// Stable reason code for this error
    pub fn reason(&self) -> &'static str {
        match self {
            PlannerError::InvalidInput(_) => "invalid_input",
            PlannerError::Unauthorized(_) => "unauthorized",
            PlannerError::TaskNotFound(_) | PlannerError::ListNotFound(_) => "not_found",
            PlannerError::DefaultListProtected(_) => "default_list_protected",
            PlannerError::ProtectedList(_) => "protected_list",
            PlannerError::CrossOwner { .. } => "cross_owner",
            PlannerError::DuplicateList(_) => "duplicate",
            PlannerError::Storage(_) => "storage",
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        PlannerError::InvalidInput(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        PlannerError::Unauthorized(message.into())
    }

    /// True for failures that originate in the store rather than the caller
    pub fn is_storage(&self) -> bool {
        matches!(self, PlannerError::Storage(_))
    }
}
