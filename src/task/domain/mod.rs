//! Domain model for tasks.
//!
//! Tasks carry a validated title, a category that selects their priority
//! strategy, an optional due date and a forward-only workflow status. They
//! reference their project by identifier only; whether that project exists
//! is checked by the service layer.

mod error;
mod ids;
mod priority;
mod status;
mod task;

pub use error::{ParseTaskCategoryError, ParseTaskStatusError, TaskDomainError};
pub use ids::{TaskId, TaskTitle};
pub use priority::{MAX_URGENCY, PriorityContext, PriorityStrategy, TaskCategory};
pub use status::TaskStatus;
pub use task::{NewTask, PersistedTaskData, Task};
