//! Application services for project management.

mod project;

pub use project::{ProjectService, ProjectServiceError, ProjectServiceResult};
