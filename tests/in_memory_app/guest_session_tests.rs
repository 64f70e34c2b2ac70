//! Guest task list lifecycle and persistence.

use super::helpers::{Environment, env, id_of, visible_texts};
use rstest::rstest;
use tasklist::app::GUEST_LABEL;
use tasklist::task::{domain::SessionMode, services::TaskListController};

#[rstest]
#[tokio::test]
async fn guest_adds_and_deletes_tasks(env: Environment) {
    let mut app = env.open_app();
    app.enter_guest().await;
    let list = app.task_list_mut().expect("guest list should be open");

    assert!(list.submit_task("Buy milk").await);
    assert!(list.submit_task("Walk dog").await);
    assert_eq!(visible_texts(&app), vec!["Walk dog", "Buy milk"]);

    let milk = id_of(&app, "Buy milk");
    let open_list = app.task_list().expect("guest list should be open");
    assert!(open_list.delete_task(&milk).await);

    assert_eq!(visible_texts(&app), vec!["Walk dog"]);
    assert!(env.notifier.is_empty());
}

#[rstest]
#[tokio::test]
async fn guest_tasks_survive_a_reload(env: Environment) {
    let mut first = env.open_app();
    first.enter_guest().await;
    let list = first.task_list_mut().expect("guest list should be open");
    assert!(list.submit_task("Buy milk").await);
    assert!(list.submit_task("Walk dog").await);
    let walk = id_of(&first, "Walk dog");
    assert!(
        first
            .task_list()
            .expect("guest list should be open")
            .toggle_task(&walk)
            .await
    );

    let mut reloaded = env.open_app();
    assert!(!reloaded.start().await);
    reloaded.enter_guest().await;

    assert_eq!(visible_texts(&reloaded), vec!["Walk dog", "Buy milk"]);
    let walk_again = reloaded
        .task_list()
        .and_then(|list| list.actions().find(&walk))
        .expect("task should reload with the same id");
    assert!(walk_again.is_completed());
}

#[rstest]
#[tokio::test]
async fn guest_mode_never_contacts_the_backend(env: Environment) {
    env.backend
        .fail_with("backend is down")
        .expect("backend should accept setting");
    let mut app = env.open_app();

    app.enter_guest().await;
    let list = app.task_list_mut().expect("guest list should be open");
    assert!(list.submit_task("Offline task").await);

    assert_eq!(visible_texts(&app), vec!["Offline task"]);
    assert!(env.notifier.is_empty());
}

#[rstest]
#[tokio::test]
async fn guest_is_labelled_and_leaves_without_signing_out(env: Environment) {
    let mut app = env.open_app();
    assert_eq!(app.user_label(), None);

    app.enter_guest().await;
    assert_eq!(app.user_label().as_deref(), Some(GUEST_LABEL));
    assert_eq!(
        app.task_list().map(TaskListController::mode),
        Some(SessionMode::Guest)
    );

    app.sign_out().await;
    assert!(app.task_list().is_none());
    assert_eq!(app.user_label(), None);
    assert!(env.notifier.is_empty());
}
