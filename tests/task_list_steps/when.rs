//! When steps for task list BDD scenarios.

use super::world::{PASSWORD, TaskListWorld, run_async};
use rstest_bdd_macros::when;

#[when(r#"the user adds "{text}""#)]
fn user_adds(world: &mut TaskListWorld, text: String) -> Result<(), eyre::Report> {
    let list = world.list_mut()?;
    run_async(list.submit_task(&text));
    Ok(())
}

#[when(r#"the user deletes "{text}""#)]
fn user_deletes(world: &mut TaskListWorld, text: String) -> Result<(), eyre::Report> {
    let task = world.visible_task(&text)?;
    if !run_async(world.list()?.delete_task(task.id())) {
        return Err(eyre::eyre!("delete of '{text}' was rejected"));
    }
    Ok(())
}

#[when(r#"the user completes "{text}""#)]
fn user_completes(world: &mut TaskListWorld, text: String) -> Result<(), eyre::Report> {
    let task = world.visible_task(&text)?;
    if !run_async(world.list()?.toggle_task(task.id())) {
        return Err(eyre::eyre!("toggle of '{text}' was rejected"));
    }
    Ok(())
}

#[when(r#"the user searches for "{term}""#)]
fn user_searches(world: &mut TaskListWorld, term: String) -> Result<(), eyre::Report> {
    world.list_mut()?.set_search_term(term);
    Ok(())
}

#[when("the app is reloaded as a guest")]
fn app_reloaded_as_guest(world: &mut TaskListWorld) {
    world.reload();
    run_async(world.app.start());
    run_async(world.app.enter_guest());
}

#[when(r#"the user signs in as "{email}""#)]
fn user_signs_in(world: &mut TaskListWorld, email: String) -> Result<(), eyre::Report> {
    if !run_async(world.app.sign_in(&email, PASSWORD)) {
        return Err(eyre::eyre!("sign-in failed for '{email}'"));
    }
    Ok(())
}
