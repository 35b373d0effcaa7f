//! Project storage and lookup against `PostgreSQL`.

use crate::postgres::cluster::{PostgresServer, postgres_server};
use crate::postgres::helpers::setup;
use mockable::DefaultClock;
use rstest::rstest;
use tasktrack::project::{
    domain::{Project, ProjectId, ProjectName},
    ports::{ProjectRepository, ProjectRepositoryError},
};

fn project(name: &str) -> Project {
    Project::new(ProjectName::new(name).expect("valid name"), &DefaultClock)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stored_project_is_found_and_listed_in_order(postgres_server: PostgresServer) {
    let fixture = setup(postgres_server).expect("database setup");
    let first = project("Backend Revamp");
    let second = project("Mobile App");
    fixture.projects.store(&first).await.expect("store first");
    fixture.projects.store(&second).await.expect("store second");

    let found = fixture
        .projects
        .find_by_id(first.id())
        .await
        .expect("lookup should succeed")
        .expect("project should exist");
    let listed = fixture.projects.list().await.expect("list should succeed");

    assert_eq!(found.id(), first.id());
    assert_eq!(found.name(), first.name());
    let ids: Vec<ProjectId> = listed.iter().map(Project::id).collect();
    assert_eq!(ids, vec![first.id(), second.id()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_project_is_rejected(postgres_server: PostgresServer) {
    let fixture = setup(postgres_server).expect("database setup");
    let stored = project("Backend Revamp");
    fixture.projects.store(&stored).await.expect("first store");

    let result = fixture.projects.store(&stored).await;

    assert!(matches!(
        result,
        Err(ProjectRepositoryError::DuplicateProject(id)) if id == stored.id()
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_project_is_absent(postgres_server: PostgresServer) {
    let fixture = setup(postgres_server).expect("database setup");

    let found = fixture
        .projects
        .find_by_id(ProjectId::new())
        .await
        .expect("lookup should succeed");

    assert!(found.is_none());
}
