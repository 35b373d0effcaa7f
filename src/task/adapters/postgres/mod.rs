//! `PostgreSQL` adapters for task persistence.

pub(crate) mod models;
mod repository;
mod schema;

pub(crate) use repository::{row_to_task, to_changeset, to_new_row};
pub use repository::{PostgresTaskRepository, TaskPgPool};
