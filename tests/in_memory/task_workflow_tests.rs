//! Task creation, updates, transitions and removal through the tracker.

use crate::in_memory::helpers::{create_project, days_from_today, tracker};
use rstest::rstest;
use tasktrack::{
    app::InMemoryTaskTracker,
    error::ErrorKind,
    task::{
        domain::{TaskCategory, TaskId, TaskStatus},
        services::{CreateTaskRequest, DueDateUpdate, UpdateTaskRequest},
    },
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bug_moves_through_the_workflow(tracker: InMemoryTaskTracker) {
    let project = create_project(&tracker, "Backend Revamp")
        .await
        .expect("project creation should succeed");
    let task = tracker
        .tasks()
        .create_task(
            CreateTaskRequest::new(project.id(), "Fix login bug", "bug")
                .with_due_date(days_from_today(1)),
        )
        .await
        .expect("task creation should succeed");
    assert_eq!(task.status(), TaskStatus::Todo);
    assert_eq!(task.category(), TaskCategory::Bug);

    let doing = tracker
        .tasks()
        .update_task(task.id(), UpdateTaskRequest::new().with_status("DOING"))
        .await
        .expect("TODO -> DOING should succeed");
    assert_eq!(doing.status(), TaskStatus::Doing);

    let back = tracker
        .tasks()
        .update_task(task.id(), UpdateTaskRequest::new().with_status("TODO"))
        .await
        .expect_err("DOING -> TODO should be rejected");
    assert_eq!(back.kind(), ErrorKind::InvalidStatusTransition);

    let done = tracker
        .tasks()
        .update_task(task.id(), UpdateTaskRequest::new().with_status("DONE"))
        .await
        .expect("DOING -> DONE should succeed");
    assert_eq!(done.status(), TaskStatus::Done);

    let reopen = tracker
        .tasks()
        .update_task(task.id(), UpdateTaskRequest::new().with_status("DOING"))
        .await
        .expect_err("DONE should be terminal");
    assert_eq!(reopen.kind(), ErrorKind::InvalidStatusTransition);

    let listed = tracker
        .tasks()
        .list_tasks(project.id())
        .await
        .expect("list should succeed");
    assert_eq!(listed.len(), 1);
    let stored = listed.first().expect("one task");
    assert_eq!(stored.status(), TaskStatus::Done);
    assert!(stored.priority_score(&mockable::DefaultClock) > 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tasks_of_different_projects_do_not_mix(tracker: InMemoryTaskTracker) {
    let backend = create_project(&tracker, "Backend Revamp")
        .await
        .expect("project creation should succeed");
    let mobile = create_project(&tracker, "Mobile App")
        .await
        .expect("project creation should succeed");
    let backend_task = tracker
        .tasks()
        .create_task(CreateTaskRequest::new(backend.id(), "Fix login bug", "bug"))
        .await
        .expect("task creation should succeed");
    let mobile_task = tracker
        .tasks()
        .create_task(CreateTaskRequest::new(mobile.id(), "Add dark mode", "feature"))
        .await
        .expect("task creation should succeed");

    let backend_tasks = tracker
        .tasks()
        .list_tasks(backend.id())
        .await
        .expect("list should succeed");
    let mobile_tasks = tracker
        .tasks()
        .list_tasks(mobile.id())
        .await
        .expect("list should succeed");

    assert_eq!(backend_tasks, vec![backend_task]);
    assert_eq!(mobile_tasks, vec![mobile_task]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_keeps_fields_that_are_not_mentioned(tracker: InMemoryTaskTracker) {
    let project = create_project(&tracker, "Backend Revamp")
        .await
        .expect("project creation should succeed");
    let due = days_from_today(10);
    let task = tracker
        .tasks()
        .create_task(
            CreateTaskRequest::new(project.id(), "Write release notes", "chore")
                .with_due_date(due),
        )
        .await
        .expect("task creation should succeed");

    let renamed = tracker
        .tasks()
        .update_task(
            task.id(),
            UpdateTaskRequest::new().with_title("  Write the release notes  "),
        )
        .await
        .expect("rename should succeed");

    assert_eq!(renamed.title().as_str(), "Write the release notes");
    assert_eq!(renamed.due_date(), Some(due));
    assert_eq!(renamed.status(), TaskStatus::Todo);
    assert_eq!(renamed.created_at(), task.created_at());

    let cleared = tracker
        .tasks()
        .update_task(task.id(), UpdateTaskRequest::new().with_due_date(DueDateUpdate::Clear))
        .await
        .expect("clearing the due date should succeed");
    assert_eq!(cleared.due_date(), None);
    assert_eq!(cleared.title().as_str(), "Write the release notes");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_title_leaves_task_unchanged(tracker: InMemoryTaskTracker) {
    let project = create_project(&tracker, "Backend Revamp")
        .await
        .expect("project creation should succeed");
    let task = tracker
        .tasks()
        .create_task(CreateTaskRequest::new(project.id(), "Fix login bug", "bug"))
        .await
        .expect("task creation should succeed");

    let err = tracker
        .tasks()
        .update_task(
            task.id(),
            UpdateTaskRequest::new().with_title("abc").with_status("DOING"),
        )
        .await
        .expect_err("short title should be rejected");

    assert_eq!(err.kind(), ErrorKind::Validation);
    let stored = tracker
        .tasks()
        .get_task(task.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(stored, task);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_task_disappears_from_listing(tracker: InMemoryTaskTracker) {
    let project = create_project(&tracker, "Backend Revamp")
        .await
        .expect("project creation should succeed");
    let keep = tracker
        .tasks()
        .create_task(CreateTaskRequest::new(project.id(), "Fix login bug", "bug"))
        .await
        .expect("task creation should succeed");
    let removed = tracker
        .tasks()
        .create_task(CreateTaskRequest::new(project.id(), "Upgrade deps", "chore"))
        .await
        .expect("task creation should succeed");

    tracker
        .tasks()
        .delete_task(removed.id())
        .await
        .expect("delete should succeed");

    let listed = tracker
        .tasks()
        .list_tasks(project.id())
        .await
        .expect("list should succeed");
    assert_eq!(listed, vec![keep]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn operations_on_unknown_task_are_not_found(tracker: InMemoryTaskTracker) {
    let missing = TaskId::new();

    let get = tracker
        .tasks()
        .get_task(missing)
        .await
        .expect_err("lookup should fail");
    let update = tracker
        .tasks()
        .update_task(missing, UpdateTaskRequest::new().with_status("DOING"))
        .await
        .expect_err("update should fail");
    let delete = tracker
        .tasks()
        .delete_task(missing)
        .await
        .expect_err("delete should fail");

    assert_eq!(get.kind(), ErrorKind::NotFound);
    assert_eq!(update.kind(), ErrorKind::NotFound);
    assert_eq!(delete.kind(), ErrorKind::NotFound);
}
