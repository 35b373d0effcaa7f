//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning project identifier.
    pub project_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Task category.
    pub category: String,
    /// Workflow status.
    pub status: String,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning project identifier.
    pub project_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Task category.
    pub category: String,
    /// Workflow status.
    pub status: String,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset for the mutable task columns.
///
/// A `None` due date is written as `NULL` so clearing it persists.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Task title.
    pub title: String,
    /// Workflow status.
    pub status: String,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
