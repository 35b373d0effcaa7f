//! Caller-facing error classification shared by the service layers.

use std::fmt;

/// Coarse category of a service error.
///
/// Outer layers map these to their own responses: validation and invalid
/// transitions are the caller's to fix, missing references are reported as
/// such, and persistence failures are infrastructure problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input such as a short title or unknown category.
    Validation,
    /// Reference to a project or task that does not exist.
    NotFound,
    /// A status change the workflow does not allow.
    InvalidStatusTransition,
    /// Storage backend failure or corrupt persisted data.
    Persistence,
}

impl ErrorKind {
    /// Returns `true` when the caller can succeed by correcting its input.
    #[must_use]
    pub const fn is_client_error(self) -> bool {
        !matches!(self, Self::Persistence)
    }

    /// Returns a stable lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::InvalidStatusTransition => "invalid_status_transition",
            Self::Persistence => "persistence",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
