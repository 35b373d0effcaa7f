//! Composition root.
//!
//! [`TaskTracker`] owns the repositories and services for one running
//! application. Services receive their repositories explicitly; nothing in
//! the core holds a global instance.

use crate::project::{
    adapters::{memory::InMemoryProjectRepository, postgres::PostgresProjectRepository},
    ports::ProjectRepository,
    services::ProjectService,
};
use crate::settings::{Settings, StorageBackend, StorageSettings};
use crate::task::{
    adapters::{memory::InMemoryTaskRepository, postgres::PostgresTaskRepository},
    ports::TaskRepository,
    services::TaskService,
};
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use mockable::{Clock, DefaultClock};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors returned while composing a tracker.
#[derive(Debug, Error)]
pub enum AppError {
    /// The `PostgreSQL` backend was selected without a database URL.
    #[error("storage.database_url is required for the postgres backend")]
    MissingDatabaseUrl,

    /// The connection pool could not be established.
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] PoolError),
}

/// Project and task services sharing one set of repositories.
#[derive(Clone)]
pub struct TaskTracker<P, R, C>
where
    P: ProjectRepository,
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    projects: ProjectService<P, C>,
    tasks: TaskService<P, R, C>,
}

/// Tracker backed by process-local storage.
pub type InMemoryTaskTracker<C = DefaultClock> =
    TaskTracker<InMemoryProjectRepository, InMemoryTaskRepository, C>;

/// Tracker backed by `PostgreSQL`.
pub type PostgresTaskTracker<C = DefaultClock> =
    TaskTracker<PostgresProjectRepository, PostgresTaskRepository, C>;

impl<P, R, C> TaskTracker<P, R, C>
where
    P: ProjectRepository,
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Wires services around the given repositories and clock.
    #[must_use]
    pub fn new(project_repository: Arc<P>, task_repository: Arc<R>, clock: Arc<C>) -> Self {
        let projects = ProjectService::new(Arc::clone(&project_repository), Arc::clone(&clock));
        let tasks = TaskService::new(project_repository, task_repository, clock);
        Self { projects, tasks }
    }

    /// Returns the project service.
    #[must_use]
    pub const fn projects(&self) -> &ProjectService<P, C> {
        &self.projects
    }

    /// Returns the task service.
    #[must_use]
    pub const fn tasks(&self) -> &TaskService<P, R, C> {
        &self.tasks
    }
}

impl<C> InMemoryTaskTracker<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a tracker with empty in-memory repositories.
    #[must_use]
    pub fn in_memory(clock: Arc<C>) -> Self {
        Self::new(
            Arc::new(InMemoryProjectRepository::new()),
            Arc::new(InMemoryTaskRepository::new()),
            clock,
        )
    }
}

impl<C> PostgresTaskTracker<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a tracker whose repositories share `pool`.
    #[must_use]
    pub fn postgres(pool: &Pool<ConnectionManager<PgConnection>>, clock: Arc<C>) -> Self {
        Self::new(
            Arc::new(PostgresProjectRepository::new(pool.clone())),
            Arc::new(PostgresTaskRepository::new(pool.clone())),
            clock,
        )
    }
}

/// Tracker selected at runtime from [`Settings`].
pub enum ConfiguredTracker {
    /// In-memory storage.
    InMemory(InMemoryTaskTracker),
    /// `PostgreSQL` storage.
    Postgres(PostgresTaskTracker),
}

impl ConfiguredTracker {
    /// Builds the tracker described by `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::MissingDatabaseUrl`] when the `PostgreSQL` backend
    /// has no URL, or [`AppError::Pool`] when the pool cannot connect.
    pub fn from_settings(settings: &Settings) -> Result<Self, AppError> {
        let clock = Arc::new(DefaultClock);
        match settings.storage.backend {
            StorageBackend::Memory => {
                info!("using in-memory storage");
                Ok(Self::InMemory(InMemoryTaskTracker::in_memory(clock)))
            }
            StorageBackend::Postgres => {
                let pool = connect(&settings.storage)?;
                info!(pool_size = settings.storage.pool_size, "using postgres storage");
                Ok(Self::Postgres(PostgresTaskTracker::postgres(&pool, clock)))
            }
        }
    }
}

/// Opens a `PostgreSQL` connection pool.
///
/// # Errors
///
/// Returns [`AppError::MissingDatabaseUrl`] when no URL is configured, or
/// [`AppError::Pool`] when the pool cannot establish its connections.
pub fn connect(
    storage: &StorageSettings,
) -> Result<Pool<ConnectionManager<PgConnection>>, AppError> {
    let url = storage
        .database_url
        .as_deref()
        .filter(|url| !url.trim().is_empty())
        .ok_or(AppError::MissingDatabaseUrl)?;
    let manager = ConnectionManager::<PgConnection>::new(url);
    Ok(Pool::builder().max_size(storage.pool_size).build(manager)?)
}
