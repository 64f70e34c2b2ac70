//! Then steps for task list BDD scenarios.

use super::world::TaskListWorld;
use rstest_bdd_macros::then;

#[then(r#"the visible tasks are "{texts}""#)]
fn visible_tasks_are(world: &TaskListWorld, texts: String) -> Result<(), eyre::Report> {
    let expected: Vec<&str> = texts.split(',').map(str::trim).collect();
    let visible: Vec<String> = world
        .list()?
        .filtered_tasks()
        .iter()
        .map(|task| task.text().as_str().to_owned())
        .collect();
    if visible != expected {
        return Err(eyre::eyre!("expected tasks {expected:?}, found {visible:?}"));
    }
    Ok(())
}

#[then("no tasks are visible")]
fn no_tasks_visible(world: &TaskListWorld) -> Result<(), eyre::Report> {
    let view = world.list()?.view();
    if !view.tasks.is_empty() {
        return Err(eyre::eyre!("expected no tasks, found {}", view.tasks.len()));
    }
    if !view.show_empty_state {
        return Err(eyre::eyre!("expected the empty state to be shown"));
    }
    Ok(())
}

#[then(r#""{text}" is completed"#)]
fn task_is_completed(world: &TaskListWorld, text: String) -> Result<(), eyre::Report> {
    if !world.visible_task(&text)?.is_completed() {
        return Err(eyre::eyre!("expected '{text}' to be completed"));
    }
    Ok(())
}

#[then(r#"the user was notified "{title}""#)]
fn user_was_notified(world: &TaskListWorld, title: String) -> Result<(), eyre::Report> {
    let titles: Vec<String> = world
        .notifier
        .notifications()
        .iter()
        .map(|notification| notification.title().to_owned())
        .collect();
    if !titles.contains(&title) {
        return Err(eyre::eyre!("expected notification '{title}', found {titles:?}"));
    }
    Ok(())
}

#[then("no notification was shown")]
fn no_notification(world: &TaskListWorld) -> Result<(), eyre::Report> {
    if !world.notifier.is_empty() {
        return Err(eyre::eyre!(
            "expected no notifications, found {:?}",
            world.notifier.notifications()
        ));
    }
    Ok(())
}
