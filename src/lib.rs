//! Tasktrack: project and task tracking core.
//!
//! Clients create projects, attach tasks to them, move tasks through a fixed
//! `TODO` → `DOING` → `DONE` workflow, and read a priority score derived from
//! each task's category and due date.
//!
//! # Architecture
//!
//! Tasktrack follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`project`]: Project entity, repository port and service
//! - [`task`]: Task entity, workflow, priority strategies and service
//! - [`app`]: Composition of repositories and services
//! - [`settings`]: Layered configuration
//! - [`telemetry`]: Tracing subscriber setup
//! - [`error`]: Error classification for outer layers

pub mod app;
pub mod error;
pub mod project;
pub mod settings;
pub mod task;
pub mod telemetry;
