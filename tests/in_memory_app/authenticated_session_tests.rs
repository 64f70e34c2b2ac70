//! Signed-in task lists backed by the hosted table.

use super::helpers::{Environment, env, id_of, visible_texts};
use rstest::rstest;
use tasklist::auth::ports::SessionProvider;

async fn signed_in(env: &Environment) -> super::helpers::TestApp {
    let mut app = env.open_app();
    assert!(app.sign_in("ada@example.com", "correct horse").await);
    app
}

#[rstest]
#[tokio::test]
async fn signed_in_user_manages_remote_tasks(env: Environment) {
    let mut app = signed_in(&env).await;
    let list = app.task_list_mut().expect("task list should be open");

    assert!(list.submit_task("Buy milk").await);
    assert!(list.submit_task("Walk dog").await);
    assert_eq!(visible_texts(&app), vec!["Walk dog", "Buy milk"]);

    let walk = id_of(&app, "Walk dog");
    let open_list = app.task_list().expect("task list should be open");
    assert!(open_list.toggle_task(&walk).await);
    assert!(open_list.delete_task(&id_of(&app, "Buy milk")).await);

    let owner = app
        .auth()
        .current_session()
        .map(|session| session.user_id().clone())
        .expect("session should be active");
    let rows = env.backend.rows_for(&owner).expect("rows should be readable");
    assert_eq!(rows.len(), 1);
    assert!(rows.iter().all(|row| row.text == "Walk dog" && row.completed));
}

#[rstest]
#[tokio::test]
async fn tasks_use_backend_assigned_ids(env: Environment) {
    let mut app = signed_in(&env).await;
    let list = app.task_list_mut().expect("task list should be open");
    assert!(list.submit_task("Buy milk").await);

    let owner = app
        .auth()
        .current_session()
        .map(|session| session.user_id().clone())
        .expect("session should be active");
    let rows = env.backend.rows_for(&owner).expect("rows should be readable");
    let stored_id = rows.first().map(|row| row.id.clone()).expect("one row");

    assert_eq!(id_of(&app, "Buy milk").as_str(), stored_id);
}

#[rstest]
#[tokio::test]
async fn failed_remote_create_leaves_the_list_empty(env: Environment) {
    let mut app = signed_in(&env).await;
    env.backend
        .fail_with("database is read-only")
        .expect("backend should accept setting");
    let list = app.task_list_mut().expect("task list should be open");

    assert!(!list.submit_task("Buy milk").await);

    assert!(visible_texts(&app).is_empty());
    let notifications = env.notifier.notifications();
    let last = notifications.last().expect("failure should be reported");
    assert_eq!(last.title(), "Error adding task");
    assert_eq!(last.description(), "database is read-only");
}

#[rstest]
#[tokio::test]
async fn users_only_see_their_own_rows(env: Environment) {
    let other = env
        .backend
        .register_user("grace@example.com", "cobol")
        .expect("user should register");
    env.backend
        .seed_task(&other, "Grace's secret", false)
        .expect("row should seed");

    let mut app = signed_in(&env).await;
    let list = app.task_list_mut().expect("task list should be open");
    assert!(list.submit_task("Ada's task").await);

    assert_eq!(visible_texts(&app), vec!["Ada's task"]);
    assert_eq!(
        env.backend
            .rows_for(&other)
            .expect("rows should be readable")
            .len(),
        1
    );
}

#[rstest]
#[tokio::test]
async fn seeded_rows_load_newest_first(env: Environment) {
    let ada = {
        let probe = signed_in(&env).await;
        probe
            .auth()
            .current_session()
            .map(|session| session.user_id().clone())
            .expect("session should be active")
    };
    env.backend
        .seed_task(&ada, "Older", true)
        .expect("row should seed");
    env.backend
        .seed_task(&ada, "Newer", false)
        .expect("row should seed");

    let app = signed_in(&env).await;

    assert_eq!(visible_texts(&app), vec!["Newer", "Older"]);
}

#[rstest]
#[tokio::test]
async fn wrong_password_keeps_the_user_out(env: Environment) {
    let mut app = env.open_app();

    assert!(!app.sign_in("ada@example.com", "wrong").await);

    assert!(app.task_list().is_none());
    assert_eq!(env.notification_titles(), vec!["Sign in failed"]);
}
