//! When steps for board drag and drop BDD scenarios.

use super::world::{BoardWorld, run_async};
use chrono::{Duration, Utc};
use rstest_bdd_macros::when;
use taskboard::board::{
    domain::{DropEvent, Priority, Selection, UserId},
    services::CreateTaskRequest,
};

#[when(
    r#"task "{id}" is dragged from "{source}" index {from:usize} to "{destination}" index {to:usize}"#
)]
fn drag_task(
    world: &mut BoardWorld,
    id: String,
    source: String,
    from: usize,
    destination: String,
    to: usize,
) -> Result<(), eyre::Report> {
    let landing = Some((destination.as_str(), to));
    let event = DropEvent::from_raw(&id, (source.as_str(), from), landing)
        .map_err(|err| eyre::eyre!("invalid drop event: {err}"))?;
    if let Err(err) = run_async(world.coordinator.handle_drop(&event)) {
        world.last_error = Some(err);
    }
    Ok(())
}

#[when(r#"the priority filter is set to "{priority}""#)]
fn set_priority_filter(world: &mut BoardWorld, priority: String) -> Result<(), eyre::Report> {
    let selection = Selection::<Priority>::try_from(priority.as_str())
        .map_err(|err| eyre::eyre!("invalid priority in scenario: {err}"))?;
    world.coordinator.set_priority_filter(selection);
    Ok(())
}

#[when(r#"task "{description}" with priority "{priority}" is created for "{assignee}""#)]
fn create_task(
    world: &mut BoardWorld,
    description: String,
    priority: String,
    assignee: String,
) -> Result<(), eyre::Report> {
    let level = Priority::try_from(priority.as_str())
        .map_err(|err| eyre::eyre!("invalid priority in scenario: {err}"))?;
    let owner = UserId::new(assignee).map_err(|err| eyre::eyre!("invalid assignee: {err}"))?;
    let deadline = Utc::now() + Duration::days(7);
    let request = CreateTaskRequest::new(description, level, deadline, owner);
    match run_async(world.coordinator.create_task(request)) {
        Ok(task) => world.created_task = Some(task),
        Err(err) => world.last_error = Some(err),
    }
    Ok(())
}
