//! Repository port behaviour of the in-memory adapters.

use mockable::DefaultClock;
use rstest::{fixture, rstest};
use tasktrack::{
    project::domain::ProjectId,
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::{NewTask, Task, TaskCategory, TaskStatus, TaskTitle},
        ports::{TaskRepository, TaskRepositoryError},
    },
};

#[fixture]
fn repo() -> InMemoryTaskRepository {
    InMemoryTaskRepository::new()
}

fn task_for(project_id: ProjectId, title: &str) -> Task {
    Task::new(
        NewTask {
            project_id,
            title: TaskTitle::new(title).expect("valid title"),
            category: TaskCategory::Feature,
            due_date: None,
        },
        &DefaultClock,
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_store_is_rejected(repo: InMemoryTaskRepository) {
    let task = task_for(ProjectId::new(), "Add search");
    repo.store(&task).await.expect("first store should succeed");

    let result = repo.store(&task).await;

    assert!(matches!(result, Err(TaskRepositoryError::DuplicateTask(id)) if id == task.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_of_unstored_task_is_not_found(repo: InMemoryTaskRepository) {
    let task = task_for(ProjectId::new(), "Add search");

    let result = repo.update(&task).await;

    assert!(matches!(result, Err(TaskRepositoryError::NotFound(id)) if id == task.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_replaces_stored_snapshot(repo: InMemoryTaskRepository) {
    let mut task = task_for(ProjectId::new(), "Add search");
    repo.store(&task).await.expect("store should succeed");
    task.transition_to(TaskStatus::Doing, &DefaultClock)
        .expect("TODO -> DOING should succeed");

    repo.update(&task).await.expect("update should succeed");

    let found = repo
        .find_by_id(task.id())
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    assert_eq!(found.status(), TaskStatus::Doing);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_by_project_preserves_insertion_order(repo: InMemoryTaskRepository) {
    let project_id = ProjectId::new();
    let other_project = ProjectId::new();
    let first = task_for(project_id, "First task");
    let foreign = task_for(other_project, "Other task");
    let second = task_for(project_id, "Second task");
    for task in [&first, &foreign, &second] {
        repo.store(task).await.expect("store should succeed");
    }

    let listed = repo
        .list_by_project(project_id)
        .await
        .expect("list should succeed");

    assert_eq!(listed, vec![first, second]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_task_from_project_listing(repo: InMemoryTaskRepository) {
    let project_id = ProjectId::new();
    let task = task_for(project_id, "Add search");
    repo.store(&task).await.expect("store should succeed");

    repo.delete(task.id()).await.expect("delete should succeed");

    let listed = repo
        .list_by_project(project_id)
        .await
        .expect("list should succeed");
    assert!(listed.is_empty());
    assert!(matches!(
        repo.delete(task.id()).await,
        Err(TaskRepositoryError::NotFound(_))
    ));
}
