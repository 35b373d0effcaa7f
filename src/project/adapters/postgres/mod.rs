//! `PostgreSQL` adapters for project persistence.

pub(crate) mod models;
mod repository;
mod schema;

pub(crate) use repository::{row_to_project, to_new_row};
pub use repository::{PostgresProjectRepository, ProjectPgPool};
