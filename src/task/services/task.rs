//! Service layer for task creation, update, workflow transitions and removal.

use crate::error::ErrorKind;
use crate::project::{
    domain::ProjectId,
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::task::{
    domain::{
        NewTask, ParseTaskCategoryError, ParseTaskStatusError, Task, TaskCategory,
        TaskDomainError, TaskId, TaskStatus, TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Request payload for creating a task under a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    project_id: ProjectId,
    title: String,
    task_type: String,
    due_date: Option<NaiveDate>,
}

impl CreateTaskRequest {
    /// Creates a request with the required task fields.
    ///
    /// `task_type` must be one of `bug`, `feature` or `chore`.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        title: impl Into<String>,
        task_type: impl Into<String>,
    ) -> Self {
        Self {
            project_id,
            title: title.into(),
            task_type: task_type.into(),
            due_date: None,
        }
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Requested change to a task's due date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DueDateUpdate {
    /// Leave the due date as it is.
    #[default]
    Keep,
    /// Remove the due date.
    Clear,
    /// Replace the due date.
    Set(NaiveDate),
}

impl From<Option<NaiveDate>> for DueDateUpdate {
    /// Treats the value as a full overwrite: `None` clears the due date.
    fn from(value: Option<NaiveDate>) -> Self {
        value.map_or(Self::Clear, Self::Set)
    }
}

/// Request payload for updating an existing task.
///
/// Fields left unset are not changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    due_date: DueDateUpdate,
    status: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates a request that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the due-date change.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<DueDateUpdate>) -> Self {
        self.due_date = due_date.into();
        self
    }

    /// Requests a status transition. Accepts `TODO`, `DOING` or `DONE`.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation or workflow rule failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The task type is not a known category.
    #[error(transparent)]
    InvalidTaskType(#[from] ParseTaskCategoryError),
    /// The status string is not a known status.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),
    /// The referenced project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// Project lookup failed.
    #[error(transparent)]
    Project(ProjectRepositoryError),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

impl TaskServiceError {
    /// Classifies the error for callers that translate it to a response.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(TaskDomainError::InvalidStatusTransition { .. }) => {
                ErrorKind::InvalidStatusTransition
            }
            Self::Domain(TaskDomainError::TitleTooShort { .. })
            | Self::InvalidTaskType(_)
            | Self::InvalidStatus(_) => ErrorKind::Validation,
            Self::ProjectNotFound(_)
            | Self::Project(ProjectRepositoryError::NotFound(_))
            | Self::Repository(TaskRepositoryError::NotFound(_)) => ErrorKind::NotFound,
            Self::Project(_) | Self::Repository(_) => ErrorKind::Persistence,
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service.
///
/// Read-modify-write operations are serialized through an internal lock so
/// that concurrent updates to the same task through one service never
/// interleave.
#[derive(Clone)]
pub struct TaskService<P, R, C>
where
    P: ProjectRepository,
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    tasks: Arc<R>,
    clock: Arc<C>,
    write_lock: Arc<Mutex<()>>,
}

impl<P, R, C> TaskService<P, R, C>
where
    P: ProjectRepository,
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub fn new(projects: Arc<P>, tasks: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            projects,
            tasks,
            clock,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Creates and persists a task under an existing project.
    ///
    /// Project existence is checked first, then the task type, then the
    /// title. Nothing is persisted when any check fails.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::ProjectNotFound`] when the project does not
    /// exist, [`TaskServiceError::InvalidTaskType`] for an unknown category,
    /// [`TaskServiceError::Domain`] for a short title, or
    /// [`TaskServiceError::Repository`] when persistence fails.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let CreateTaskRequest {
            project_id,
            title,
            task_type,
            due_date,
        } = request;

        self.ensure_project_exists(project_id).await?;
        let category = TaskCategory::try_from(task_type.as_str())?;
        let task_title = TaskTitle::new(title)?;

        let task = Task::new(
            NewTask {
                project_id,
                title: task_title,
                category,
                due_date,
            },
            &*self.clock,
        );
        self.tasks.store(&task).await?;
        info!(
            task_id = %task.id(),
            %project_id,
            category = %task.category(),
            "task created"
        );
        Ok(task)
    }

    /// Returns the tasks of an existing project in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::ProjectNotFound`] when the project does not
    /// exist, or [`TaskServiceError::Repository`] when lookup fails.
    pub async fn list_tasks(&self, project_id: ProjectId) -> TaskServiceResult<Vec<Task>> {
        self.ensure_project_exists(project_id).await?;
        let tasks = self.tasks.list_by_project(project_id).await?;
        debug!(%project_id, count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    /// Fetches a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] wrapping
    /// [`TaskRepositoryError::NotFound`] when the task does not exist.
    pub async fn get_task(&self, task_id: TaskId) -> TaskServiceResult<Task> {
        debug!(%task_id, "fetching task");
        Ok(self.tasks.get(task_id).await?)
    }

    /// Applies a title, due-date and status change to a task.
    ///
    /// Changes are applied in that order to a working copy, which is
    /// persisted only when every step succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the task does not exist,
    /// [`TaskServiceError::InvalidStatus`] for an unknown status string, or
    /// [`TaskServiceError::Domain`] for a short title or a disallowed
    /// transition.
    pub async fn update_task(
        &self,
        task_id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskServiceResult<Task> {
        let UpdateTaskRequest {
            title,
            due_date,
            status,
        } = request;
        let target_status = status
            .as_deref()
            .map(TaskStatus::try_from)
            .transpose()?;

        let _guard = self.write_lock.lock().await;
        let mut task = self.tasks.get(task_id).await?;

        if let Some(new_title) = title {
            task.update_title(new_title, &*self.clock)?;
        }
        match due_date {
            DueDateUpdate::Keep => {}
            DueDateUpdate::Clear => task.update_due_date(None, &*self.clock),
            DueDateUpdate::Set(date) => task.update_due_date(Some(date), &*self.clock),
        }
        if let Some(target) = target_status {
            self.apply_transition(&mut task, target)?;
        }

        self.tasks.update(&task).await?;
        info!(%task_id, status = %task.status(), "task updated");
        Ok(task)
    }

    /// Moves a task to `status`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the task does not exist
    /// or [`TaskServiceError::Domain`] when the transition is not allowed.
    pub async fn transition_task(
        &self,
        task_id: TaskId,
        status: TaskStatus,
    ) -> TaskServiceResult<Task> {
        let _guard = self.write_lock.lock().await;
        let mut task = self.tasks.get(task_id).await?;
        self.apply_transition(&mut task, status)?;
        self.tasks.update(&task).await?;
        Ok(task)
    }

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] wrapping
    /// [`TaskRepositoryError::NotFound`] when the task does not exist.
    pub async fn delete_task(&self, task_id: TaskId) -> TaskServiceResult<()> {
        let _guard = self.write_lock.lock().await;
        self.tasks.delete(task_id).await?;
        info!(%task_id, "task deleted");
        Ok(())
    }

    fn apply_transition(&self, task: &mut Task, target: TaskStatus) -> TaskServiceResult<()> {
        let from = task.status();
        if let Err(err) = task.transition_to(target, &*self.clock) {
            warn!(task_id = %task.id(), %from, to = %target, "status transition rejected");
            return Err(err.into());
        }
        if from != target {
            info!(task_id = %task.id(), %from, to = %target, "task status changed");
        }
        Ok(())
    }

    async fn ensure_project_exists(&self, project_id: ProjectId) -> TaskServiceResult<()> {
        let project = self
            .projects
            .find_by_id(project_id)
            .await
            .map_err(TaskServiceError::Project)?;
        if project.is_none() {
            debug!(%project_id, "referenced project does not exist");
            return Err(TaskServiceError::ProjectNotFound(project_id));
        }
        Ok(())
    }
}
