//! Service layer for project creation and lookup.

use crate::error::ErrorKind;
use crate::project::{
    domain::{Project, ProjectDomainError, ProjectId, ProjectName},
    ports::{ProjectRepository, ProjectRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Service-level errors for project operations.
#[derive(Debug, Error)]
pub enum ProjectServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),
}

impl ProjectServiceError {
    /// Classifies the error for callers that translate it to a response.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::Validation,
            Self::Repository(ProjectRepositoryError::NotFound(_)) => ErrorKind::NotFound,
            Self::Repository(_) => ErrorKind::Persistence,
        }
    }
}

/// Result type for project service operations.
pub type ProjectServiceResult<T> = Result<T, ProjectServiceError>;

/// Project orchestration service.
#[derive(Clone)]
pub struct ProjectService<R, C>
where
    R: ProjectRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ProjectService<R, C>
where
    R: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new project service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates and persists a new project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Domain`] when the name is shorter than
    /// five trimmed characters, or [`ProjectServiceError::Repository`] when
    /// persistence fails.
    pub async fn create(&self, name: impl Into<String>) -> ProjectServiceResult<Project> {
        let project_name = ProjectName::new(name)?;
        let project = Project::new(project_name, &*self.clock);
        self.repository.store(&project).await?;
        info!(project_id = %project.id(), name = %project.name(), "project created");
        Ok(project)
    }

    /// Fetches a project by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] wrapping
    /// [`ProjectRepositoryError::NotFound`] when the project does not exist.
    pub async fn get(&self, project_id: ProjectId) -> ProjectServiceResult<Project> {
        debug!(%project_id, "fetching project");
        Ok(self.repository.get(project_id).await?)
    }

    /// Returns all projects in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn list(&self) -> ProjectServiceResult<Vec<Project>> {
        Ok(self.repository.list().await?)
    }
}
