//! In-memory repository for projects.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::project::{
    domain::{Project, ProjectId},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};

/// Thread-safe in-memory project repository.
///
/// Clones share the same underlying state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    state: Arc<RwLock<InMemoryProjectState>>,
}

#[derive(Debug, Default)]
struct InMemoryProjectState {
    projects: HashMap<ProjectId, Project>,
    insertion_order: Vec<ProjectId>,
}

impl InMemoryProjectRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.projects.contains_key(&project.id()) {
            return Err(ProjectRepositoryError::DuplicateProject(project.id()));
        }

        state.insertion_order.push(project.id());
        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.state.read().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.projects.get(&id).cloned())
    }

    async fn list(&self) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.state.read().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .insertion_order
            .iter()
            .filter_map(|id| state.projects.get(id).cloned())
            .collect())
    }
}
