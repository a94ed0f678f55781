//! Persistence round trips: mutate an `AppState`, then build a fresh one
//! over the same data directory and check nothing was lost.

use std::fs;

use enterprise_dashboard::io::storage::Storage;
use enterprise_dashboard::model::{KanbanFilters, Priority, TaskStatus, TaskTag, ThemeMode, View};
use enterprise_dashboard::ops::kanban;
use enterprise_dashboard::ops::settings;
use enterprise_dashboard::ops::store::AppState;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const STATE_FILE: &str = "app_state.json";

fn open(dir: &TempDir) -> AppState {
    AppState::initialize(Some(Storage::new(dir.path(), STATE_FILE)))
}

#[test]
fn fresh_directory_starts_signed_out_on_seed_data() {
    let dir = TempDir::new().unwrap();
    let state = open(&dir);
    assert!(state.user().is_none());
    assert_eq!(state.ui.active_view, View::Login);
    assert_eq!(state.tasks.len(), 10);
    assert!(!dir.path().join(STATE_FILE).exists());
}

#[test]
fn session_tasks_and_ui_survive_restart() {
    let dir = TempDir::new().unwrap();
    let mut state = open(&dir);
    state.login("admin@example.com", "admin123").unwrap();
    kanban::move_task(&mut state, "task-2", TaskStatus::Review).unwrap();
    state.set_kanban_filters(KanbanFilters {
        tag: Some(TaskTag::Sales),
        priority: Some(Priority::High),
    });
    state.set_active_view(View::Kanban);
    state.toggle_sidebar();

    let reopened = open(&dir);
    assert_eq!(
        reopened.user().map(|u| u.name.as_str()),
        Some("Sarah Anderson")
    );
    assert_eq!(reopened.tasks, state.tasks);
    assert_eq!(reopened.users, state.users);
    assert_eq!(reopened.ui, state.ui);
    assert_eq!(
        reopened.task_by_id("task-2").map(|t| t.status),
        Some(TaskStatus::Review)
    );
}

#[test]
fn saved_session_never_holds_the_current_users_password() {
    let dir = TempDir::new().unwrap();
    let mut state = open(&dir);
    state.login("user@example.com", "user123").unwrap();

    let raw = fs::read_to_string(dir.path().join(STATE_FILE)).unwrap();
    let v: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(v["currentUser"]["name"], "Michael Chen");
    assert!(v["currentUser"].get("password").is_none());

    let reopened = open(&dir);
    assert_eq!(reopened.user().and_then(|u| u.password.clone()), None);
}

#[test]
fn theme_choice_follows_the_signed_in_user() {
    let dir = TempDir::new().unwrap();
    let mut state = open(&dir);
    state.login("admin@example.com", "admin123").unwrap();
    let theme = settings::toggle_theme(&mut state);
    assert_eq!(theme, ThemeMode::Light);

    let reopened = open(&dir);
    assert_eq!(reopened.ui.theme, ThemeMode::Light);
    assert_eq!(
        reopened.user().map(|u| u.preferences.theme),
        Some(ThemeMode::Light)
    );
}

#[test]
fn open_modal_is_not_restored() {
    let dir = TempDir::new().unwrap();
    let mut state = open(&dir);
    state.login("admin@example.com", "admin123").unwrap();
    state.set_active_view(View::Kanban);
    kanban::request_delete(&mut state, "task-1").unwrap();
    assert!(state.ui.modal.is_some());

    let reopened = open(&dir);
    assert!(reopened.ui.modal.is_none());
    assert_eq!(reopened.ui.active_view, View::Kanban);
}

#[test]
fn forbidden_view_falls_back_to_dashboard() {
    let dir = TempDir::new().unwrap();
    let mut state = open(&dir);
    state.login("sales@example.com", "sales123").unwrap();
    // Written by hand: sales may not open the reports view
    state.update_ui(|ui| ui.active_view = View::Reports);

    let reopened = open(&dir);
    assert_eq!(reopened.ui.active_view, View::Dashboard);
}

#[test]
fn corrupt_snapshot_falls_back_to_seed_data() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(STATE_FILE), "{ not json").unwrap();
    let state = open(&dir);
    assert!(state.user().is_none());
    assert_eq!(state.tasks.len(), 10);
}

#[test]
fn logout_clears_the_snapshot() {
    let dir = TempDir::new().unwrap();
    let mut state = open(&dir);
    state.login("admin@example.com", "admin123").unwrap();
    assert!(dir.path().join(STATE_FILE).exists());
    state.logout();
    assert!(!dir.path().join(STATE_FILE).exists());

    let reopened = open(&dir);
    assert!(reopened.user().is_none());
}
