//! Given steps for task list BDD scenarios.

use super::world::{PASSWORD, TaskListWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given("a guest session")]
fn guest_session(world: &mut TaskListWorld) {
    run_async(world.app.enter_guest());
}

#[given(r#"a signed-in session for "{email}""#)]
fn signed_in_session(world: &mut TaskListWorld, email: String) -> Result<(), eyre::Report> {
    world
        .backend
        .register_user(&email, PASSWORD)
        .wrap_err("register scenario account")?;
    if !run_async(world.app.sign_in(&email, PASSWORD)) {
        return Err(eyre::eyre!("sign-in failed for '{email}'"));
    }
    Ok(())
}

#[given(r#"the account "{email}" has a task "{text}""#)]
fn account_has_task(
    world: &mut TaskListWorld,
    email: String,
    text: String,
) -> Result<(), eyre::Report> {
    let owner = world
        .backend
        .register_user(&email, PASSWORD)
        .wrap_err("register scenario account")?;
    world
        .backend
        .seed_task(&owner, &text, false)
        .wrap_err("seed account task")?;
    Ok(())
}

#[given(r#"the backend rejects every request with "{message}""#)]
fn backend_rejects_requests(world: &mut TaskListWorld, message: String) -> Result<(), eyre::Report> {
    world
        .backend
        .fail_with(message)
        .wrap_err("configure backend failure")
}
