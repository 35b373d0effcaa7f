//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is shorter than the minimum after trimming.
    #[error("task title must have at least {min} characters, got '{title}'")]
    TitleTooShort {
        /// Rejected input as supplied by the caller.
        title: String,
        /// Minimum accepted length in characters.
        min: usize,
    },

    /// The requested status is not reachable from the current status.
    #[error("invalid status transition for task {task_id}: {from} -> {to}")]
    InvalidStatusTransition {
        /// Task whose transition was rejected.
        task_id: TaskId,
        /// Status at the time of the request.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },
}

/// Error returned while parsing task statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}, expected TODO, DOING or DONE")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task categories.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid task_type '{0}', expected bug, feature or chore")]
pub struct ParseTaskCategoryError(pub String);
