//! Application services for task orchestration.

mod task;

pub use task::{
    CreateTaskRequest, DueDateUpdate, TaskService, TaskServiceError, TaskServiceResult,
    UpdateTaskRequest,
};
