//! Task storage, updates, listing and removal against `PostgreSQL`.

use crate::postgres::cluster::{PostgresServer, postgres_server};
use crate::postgres::helpers::{PostgresFixture, setup};
use chrono::NaiveDate;
use mockable::DefaultClock;
use rstest::rstest;
use tasktrack::{
    project::{
        domain::{Project, ProjectName},
        ports::ProjectRepository,
    },
    task::{
        domain::{NewTask, Task, TaskCategory, TaskId, TaskStatus, TaskTitle},
        ports::{TaskRepository, TaskRepositoryError},
    },
};

async fn stored_project(fixture: &PostgresFixture) -> Project {
    let project = Project::new(
        ProjectName::new("Backend Revamp").expect("valid name"),
        &DefaultClock,
    );
    fixture.projects.store(&project).await.expect("store project");
    project
}

fn task_for(project: &Project, title: &str, due_date: Option<NaiveDate>) -> Task {
    Task::new(
        NewTask {
            project_id: project.id(),
            title: TaskTitle::new(title).expect("valid title"),
            category: TaskCategory::Bug,
            due_date,
        },
        &DefaultClock,
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_round_trips_through_storage(postgres_server: PostgresServer) {
    let fixture = setup(postgres_server).expect("database setup");
    let project = stored_project(&fixture).await;
    let task = task_for(&project, "Fix login bug", NaiveDate::from_ymd_opt(2030, 1, 1));
    fixture.tasks.store(&task).await.expect("store task");

    let found = fixture.tasks.get(task.id()).await.expect("lookup");

    assert_eq!(found.id(), task.id());
    assert_eq!(found.project_id(), project.id());
    assert_eq!(found.title(), task.title());
    assert_eq!(found.category(), TaskCategory::Bug);
    assert_eq!(found.status(), TaskStatus::Todo);
    assert_eq!(found.due_date(), task.due_date());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_persists_status_and_cleared_due_date(postgres_server: PostgresServer) {
    let fixture = setup(postgres_server).expect("database setup");
    let project = stored_project(&fixture).await;
    let mut task = task_for(&project, "Fix login bug", NaiveDate::from_ymd_opt(2030, 1, 1));
    fixture.tasks.store(&task).await.expect("store task");
    task.transition_to(TaskStatus::Doing, &DefaultClock)
        .expect("TODO -> DOING should succeed");
    task.update_due_date(None, &DefaultClock);

    fixture.tasks.update(&task).await.expect("update task");

    let found = fixture.tasks.get(task.id()).await.expect("lookup");
    assert_eq!(found.status(), TaskStatus::Doing);
    assert_eq!(found.due_date(), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_by_project_returns_tasks_in_creation_order(postgres_server: PostgresServer) {
    let fixture = setup(postgres_server).expect("database setup");
    let project = stored_project(&fixture).await;
    let mut stored = Vec::new();
    for title in ["First task", "Second task", "Third task", "Fourth task"] {
        let task = task_for(&project, title, None);
        fixture.tasks.store(&task).await.expect("store task");
        stored.push(task.id());
    }

    let listed = fixture
        .tasks
        .list_by_project(project.id())
        .await
        .expect("list should succeed");

    let ids: Vec<TaskId> = listed.iter().map(Task::id).collect();
    assert_eq!(ids, stored);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_task_update_and_delete_are_not_found(postgres_server: PostgresServer) {
    let fixture = setup(postgres_server).expect("database setup");
    let project = stored_project(&fixture).await;
    let task = task_for(&project, "Fix login bug", None);

    let update = fixture.tasks.update(&task).await;
    let delete = fixture.tasks.delete(task.id()).await;

    assert!(matches!(update, Err(TaskRepositoryError::NotFound(_))));
    assert!(matches!(delete, Err(TaskRepositoryError::NotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_task_is_gone(postgres_server: PostgresServer) {
    let fixture = setup(postgres_server).expect("database setup");
    let project = stored_project(&fixture).await;
    let task = task_for(&project, "Fix login bug", None);
    fixture.tasks.store(&task).await.expect("store task");

    fixture.tasks.delete(task.id()).await.expect("delete task");

    let found = fixture.tasks.find_by_id(task.id()).await.expect("lookup");
    assert!(found.is_none());
}
