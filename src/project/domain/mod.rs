//! Domain model for projects.
//!
//! A project is a validated, named grouping. It carries no behaviour beyond
//! construction; tasks refer to it by [`ProjectId`] only.

mod error;
mod ids;
mod name;
mod project;

pub use error::ProjectDomainError;
pub use ids::ProjectId;
pub use name::ProjectName;
pub use project::{PersistedProjectData, Project};
