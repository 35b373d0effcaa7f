//! Then steps for task workflow BDD scenarios.

use super::world::{TaskWorkflowWorld, run_async};
use chrono::Utc;
use eyre::{bail, ensure};
use rstest_bdd_macros::then;
use tasktrack::{error::ErrorKind, task::domain::TaskStatus};

fn parse_status(status: &str) -> Result<TaskStatus, eyre::Report> {
    TaskStatus::try_from(status).map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskWorkflowWorld, status: String) -> Result<(), eyre::Report> {
    let expected = parse_status(&status)?;
    let task = world.current_task()?;
    ensure!(
        task.status() == expected,
        "expected status {expected}, found {}",
        task.status()
    );
    Ok(())
}

#[then(r#"the stored task status is "{status}""#)]
fn stored_task_status_is(world: &TaskWorkflowWorld, status: String) -> Result<(), eyre::Report> {
    let expected = parse_status(&status)?;
    let task_id = world.current_task()?.id();
    let stored = run_async(world.tracker.tasks().get_task(task_id))?;
    ensure!(
        stored.status() == expected,
        "expected stored status {expected}, found {}",
        stored.status()
    );
    Ok(())
}

#[then("the update fails with an invalid status transition error")]
fn update_fails_with_invalid_transition(world: &TaskWorkflowWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_update_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing update result"))?;
    match result {
        Err(err) if err.kind() == ErrorKind::InvalidStatusTransition => Ok(()),
        other => bail!("expected invalid status transition, got {other:?}"),
    }
}

#[then("task creation fails with a {kind} error")]
fn creation_fails_with(world: &TaskWorkflowWorld, kind: String) -> Result<(), eyre::Report> {
    let expected = match kind.as_str() {
        "validation" => ErrorKind::Validation,
        "not found" => ErrorKind::NotFound,
        other => bail!("unknown error kind in scenario: {other}"),
    };
    let result = world
        .last_create_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing creation result"))?;
    match result {
        Err(err) if err.kind() == expected => Ok(()),
        other => bail!("expected {expected} error, got {other:?}"),
    }
}

#[then(r#"the project lists {count:usize} task with status "{status}""#)]
fn project_lists_tasks_with_status(
    world: &TaskWorkflowWorld,
    count: usize,
    status: String,
) -> Result<(), eyre::Report> {
    let expected = parse_status(&status)?;
    let project_id = world.target_project_id()?;
    let tasks = run_async(world.tracker.tasks().list_tasks(project_id))?;
    ensure!(
        tasks.len() == count,
        "expected {count} tasks, found {}",
        tasks.len()
    );
    ensure!(
        tasks.iter().all(|task| task.status() == expected),
        "expected every task to be {expected}"
    );
    Ok(())
}

#[then("the project lists {count:usize} tasks")]
fn project_lists_tasks(world: &TaskWorkflowWorld, count: usize) -> Result<(), eyre::Report> {
    let project_id = world.target_project_id()?;
    let tasks = run_async(world.tracker.tasks().list_tasks(project_id))?;
    ensure!(
        tasks.len() == count,
        "expected {count} tasks, found {}",
        tasks.len()
    );
    Ok(())
}

#[then("the task priority score is {score:u32}")]
fn task_priority_score_is(world: &TaskWorkflowWorld, score: u32) -> Result<(), eyre::Report> {
    let task = world.current_task()?;
    let actual = task.priority_score_on(Utc::now().date_naive());
    ensure!(actual == score, "expected score {score}, found {actual}");
    Ok(())
}
