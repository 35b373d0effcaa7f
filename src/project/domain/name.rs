//! Validated project name type.

use super::ProjectDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated, trimmed project name of at least [`ProjectName::MIN_LENGTH`]
/// characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectName(String);

impl ProjectName {
    /// Minimum number of characters after trimming.
    pub const MIN_LENGTH: usize = 5;

    /// Creates a validated project name.
    ///
    /// Surrounding whitespace is removed before the length check and is not
    /// retained.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::NameTooShort`] when the trimmed value has
    /// fewer than five characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ProjectDomainError> {
        let raw = value.into();
        let normalized = raw.trim();

        if normalized.chars().count() < Self::MIN_LENGTH {
            return Err(ProjectDomainError::NameTooShort {
                name: raw,
                min: Self::MIN_LENGTH,
            });
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the project name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ProjectName {
    type Error = ProjectDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProjectName> for String {
    fn from(value: ProjectName) -> Self {
        value.0
    }
}
