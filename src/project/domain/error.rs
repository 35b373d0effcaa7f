//! Error types for project domain validation.

use thiserror::Error;

/// Errors returned while constructing project domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The project name is shorter than the minimum after trimming.
    #[error("project name must have at least {min} characters, got '{name}'")]
    NameTooShort {
        /// Rejected input as supplied by the caller.
        name: String,
        /// Minimum accepted length in characters.
        min: usize,
    },
}
