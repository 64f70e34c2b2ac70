//! Session restoration, mode switches and user labels.

use super::helpers::{Environment, env, visible_texts};
use rstest::rstest;
use tasklist::task::{domain::SessionMode, services::TaskListController};

fn mode(app: &super::helpers::TestApp) -> Option<SessionMode> {
    app.task_list().map(TaskListController::mode)
}

#[rstest]
#[tokio::test]
async fn guest_to_signed_in_replaces_the_list(env: Environment) {
    let mut app = env.open_app();
    app.enter_guest().await;
    let list = app.task_list_mut().expect("guest list should be open");
    assert!(list.submit_task("Guest errand").await);

    assert!(app.sign_in("ada@example.com", "correct horse").await);

    assert_eq!(mode(&app), Some(SessionMode::Authenticated));
    assert!(visible_texts(&app).is_empty());
    assert_eq!(app.user_label().as_deref(), Some("ada@example.com"));
}

#[rstest]
#[tokio::test]
async fn signed_in_session_is_restored_on_start(env: Environment) {
    let mut first = env.open_app();
    assert!(first.sign_in("ada@example.com", "correct horse").await);
    let list = first.task_list_mut().expect("task list should be open");
    assert!(list.submit_task("Buy milk").await);

    let mut reloaded = env.open_app();
    assert!(reloaded.start().await);

    assert_eq!(mode(&reloaded), Some(SessionMode::Authenticated));
    assert_eq!(visible_texts(&reloaded), vec!["Buy milk"]);
}

#[rstest]
#[tokio::test]
async fn sign_out_closes_the_list_and_forgets_the_session(env: Environment) {
    let mut app = env.open_app();
    assert!(app.sign_in("ada@example.com", "correct horse").await);

    app.sign_out().await;

    assert!(app.task_list().is_none());
    assert!(!app.auth().is_signed_in());
    let mut reloaded = env.open_app();
    assert!(!reloaded.start().await);
    assert!(reloaded.task_list().is_none());
}

#[rstest]
#[tokio::test]
async fn sign_up_opens_the_new_users_empty_list(env: Environment) {
    let mut app = env.open_app();

    assert!(app.sign_up("grace@example.com", "cobol").await);

    assert_eq!(mode(&app), Some(SessionMode::Authenticated));
    assert!(visible_texts(&app).is_empty());
    assert_eq!(app.user_label().as_deref(), Some("grace@example.com"));
}

#[rstest]
#[tokio::test]
async fn sign_up_awaiting_confirmation_keeps_the_app_closed(env: Environment) {
    env.backend
        .require_email_confirmation(true)
        .expect("backend should accept setting");
    let mut app = env.open_app();

    assert!(!app.sign_up("grace@example.com", "cobol").await);

    assert!(app.task_list().is_none());
    assert_eq!(env.notification_titles(), vec!["Check your email"]);
}

#[rstest]
#[tokio::test]
async fn revoked_session_is_not_restored(env: Environment) {
    let mut first = env.open_app();
    assert!(first.sign_in("ada@example.com", "correct horse").await);
    env.backend
        .revoke_all_sessions()
        .expect("backend should accept setting");

    let mut reloaded = env.open_app();

    assert!(!reloaded.start().await);
    assert_eq!(reloaded.user_label(), None);
}

#[rstest]
#[tokio::test]
async fn entering_guest_mode_ends_the_signed_in_session(env: Environment) {
    let mut app = env.open_app();
    assert!(app.sign_in("ada@example.com", "correct horse").await);

    app.enter_guest().await;

    assert_eq!(mode(&app), Some(SessionMode::Guest));
    assert!(!app.auth().is_signed_in());
    assert_eq!(app.user_label().as_deref(), Some("Guest"));
    let mut reloaded = env.open_app();
    assert!(!reloaded.start().await);
}

#[rstest]
#[tokio::test]
async fn sign_out_after_guest_switch_is_not_restored(env: Environment) {
    let mut app = env.open_app();
    assert!(app.sign_in("ada@example.com", "correct horse").await);
    app.enter_guest().await;

    app.sign_out().await;

    assert!(app.task_list().is_none());
    assert!(!app.auth().is_signed_in());
    assert_eq!(app.user_label(), None);
    let mut reloaded = env.open_app();
    assert!(!reloaded.start().await);
    assert_eq!(mode(&reloaded), None);
}

#[rstest]
#[tokio::test]
async fn repeated_sign_out_is_quiet(env: Environment) {
    let mut app = env.open_app();
    assert!(app.sign_in("ada@example.com", "correct horse").await);

    app.sign_out().await;
    app.sign_out().await;

    assert!(!app.auth().is_signed_in());
    assert!(env.notification_titles().is_empty());
    let mut reloaded = env.open_app();
    assert!(!reloaded.start().await);
}
