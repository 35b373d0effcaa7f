//! Task aggregate root.

use super::{PriorityContext, TaskCategory, TaskDomainError, TaskId, TaskStatus, TaskTitle};
use crate::project::domain::ProjectId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::Serialize;

/// Task aggregate root.
///
/// Status is private and changes only through [`Task::transition_to`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    title: TaskTitle,
    category: TaskCategory,
    due_date: Option<NaiveDate>,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Owning project.
    pub project_id: ProjectId,
    /// Validated title.
    pub title: TaskTitle,
    /// Category selecting the priority strategy.
    pub category: TaskCategory,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owning project.
    pub project_id: ProjectId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted category.
    pub category: TaskCategory,
    /// Persisted due date.
    pub due_date: Option<NaiveDate>,
    /// Persisted workflow status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task in [`TaskStatus::Todo`].
    #[must_use]
    pub fn new(new_task: NewTask, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        let NewTask {
            project_id,
            title,
            category,
            due_date,
        } = new_task;

        Self {
            id: TaskId::new(),
            project_id,
            title,
            category,
            due_date,
            status: TaskStatus::Todo,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            title: data.title,
            category: data.category,
            due_date: data.due_date,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the task category.
    #[must_use]
    pub const fn category(&self) -> TaskCategory {
        self.category
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Computes the priority score as of the clock's current UTC date.
    #[must_use]
    pub fn priority_score(&self, clock: &impl Clock) -> u32 {
        self.priority_score_on(clock.utc().date_naive())
    }

    /// Computes the priority score as of `today`.
    #[must_use]
    pub fn priority_score_on(&self, today: NaiveDate) -> u32 {
        let context = PriorityContext::new(self.due_date, today);
        self.category.strategy().compute(&context)
    }

    /// Replaces the title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TitleTooShort`] when the trimmed title has
    /// fewer than five characters. The task is left unchanged.
    pub fn update_title(
        &mut self,
        new_title: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.title = TaskTitle::new(new_title)?;
        self.touch(clock);
        Ok(())
    }

    /// Replaces or clears the due date. Past dates are accepted.
    pub fn update_due_date(&mut self, new_due_date: Option<NaiveDate>, clock: &impl Clock) {
        self.due_date = new_due_date;
        self.touch(clock);
    }

    /// Moves the task to `target`.
    ///
    /// Requesting the current status is a no-op and leaves the timestamps
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] when `target` is
    /// not reachable in one step from the current status.
    pub fn transition_to(
        &mut self,
        target: TaskStatus,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if target == self.status {
            return Ok(());
        }

        if !self.status.can_transition_to(target) {
            return Err(TaskDomainError::InvalidStatusTransition {
                task_id: self.id,
                from: self.status,
                to: target,
            });
        }

        self.status = target;
        self.touch(clock);
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
