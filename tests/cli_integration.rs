//! Integration tests for the `edash` CLI.
//!
//! Each test creates a temp data directory, runs `edash` as a subprocess,
//! and verifies stdout, stderr and/or file contents.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// Run `edash -D <dir> <args>` and return the raw output
fn edash(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_edash"))
        .arg("-D")
        .arg(dir)
        .args(args)
        .env_remove("EDASH_LOG")
        .output()
        .expect("failed to run edash")
}

/// Run and assert success, returning stdout
fn edash_ok(dir: &Path, args: &[&str]) -> String {
    let out = edash(dir, args);
    assert!(
        out.status.success(),
        "edash {:?} failed: {}",
        args,
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8(out.stdout).unwrap()
}

/// Run and assert failure, returning stderr
fn edash_err(dir: &Path, args: &[&str]) -> String {
    let out = edash(dir, args);
    assert!(!out.status.success(), "edash {:?} unexpectedly succeeded", args);
    String::from_utf8(out.stderr).unwrap()
}

#[test]
fn login_then_status() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();

    assert_eq!(
        edash_ok(dir, &["login", "admin@example.com", "admin123"]),
        "signed in as Sarah Anderson (Admin)\n"
    );
    let status = edash_ok(dir, &["status"]);
    assert!(status.contains("Sarah Anderson"));
    assert!(dir.join("app_state.json").exists());
}

#[test]
fn bad_credentials_are_rejected() {
    let tmp = TempDir::new().unwrap();
    let err = edash_err(tmp.path(), &["login", "admin@example.com", "nope"]);
    assert!(err.contains("Invalid username or password"));
    let err = edash_err(tmp.path(), &["tasks"]);
    assert!(err.contains("not signed in"));
}

#[test]
fn sales_sees_only_sales_tasks() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    edash_ok(dir, &["login", "sales@example.com", "sales123"]);

    let out = edash_ok(dir, &["tasks"]);
    let ids: Vec<&str> = out
        .lines()
        .filter_map(|l| l.split_whitespace().next())
        .collect();
    assert_eq!(ids, vec!["task-3", "task-5", "task-8"]);
    assert!(out.contains("@Jessica Rivera"));

    let out = edash_ok(dir, &["tasks", "--status", "backlog", "--search", "leads"]);
    assert_eq!(out.lines().count(), 1);
    assert!(out.starts_with("task-3"));
}

#[test]
fn sales_cannot_finish_tasks() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    edash_ok(dir, &["login", "sales@example.com", "sales123"]);

    let err = edash_err(dir, &["move", "task-3", "done"]);
    assert!(err.contains("You cannot move tasks to Done status"));

    assert_eq!(
        edash_ok(dir, &["move", "task-3", "in-progress"]),
        "Task moved to In Progress\n"
    );
    assert_eq!(
        edash_ok(dir, &["move", "task-3", "in-progress"]),
        "task-3 is already in In Progress\n"
    );
    // Not visible to sales
    let err = edash_err(dir, &["move", "task-1", "todo"]);
    assert!(err.contains("task not found: task-1"));
}

#[test]
fn add_and_delete_task() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    edash_ok(dir, &["login", "user@example.com", "user123"]);

    let id = edash_ok(
        dir,
        &["add", "Write release notes", "--priority", "high", "--due", "2024-03-01"],
    );
    let id = id.trim();
    assert!(id.starts_with("task-"));

    let listed = edash_ok(dir, &["tasks", "--priority", "high"]);
    assert!(listed.contains("Write release notes"));
    assert!(listed.contains("due 2024-03-01"));

    let err = edash_err(dir, &["add", "   "]);
    assert!(err.contains("Task title is required"));

    assert_eq!(
        edash_ok(dir, &["delete", id]),
        format!("deleted {} Write release notes\n", id)
    );
    assert!(!edash_ok(dir, &["tasks"]).contains("Write release notes"));
}

#[test]
fn perms_json_reflects_role() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    edash_ok(dir, &["login", "sales@example.com", "sales123"]);

    let out = edash_ok(dir, &["perms", "--json"]);
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["role"], "Sales");
    assert_eq!(v["features"]["reports"], false);
    assert_eq!(v["features"]["kanban"], true);
    assert_eq!(v["canManageUsers"], false);
    assert_eq!(
        v["allowedStatuses"],
        serde_json::json!(["Backlog", "To Do", "In Progress"])
    );
}

#[test]
fn export_writes_json_without_passwords() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    let out_dir = dir.join("exports");
    edash_ok(dir, &["login", "admin@example.com", "admin123"]);

    let out = edash_ok(dir, &["export", "-o", out_dir.to_str().unwrap()]);
    assert!(out.starts_with("exported to "));

    let files: Vec<_> = fs::read_dir(&out_dir).unwrap().collect();
    assert_eq!(files.len(), 1);
    let path = files[0].as_ref().unwrap().path();
    let name = path.file_name().unwrap().to_str().unwrap().to_string();
    assert!(name.starts_with("dashboard-export-") && name.ends_with(".json"));

    let content = fs::read_to_string(&path).unwrap();
    assert!(!content.contains("admin123"));
    let v: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(v["users"].as_array().unwrap().len(), 3);
    assert_eq!(v["tasks"].as_array().unwrap().len(), 10);
    assert_eq!(v["currentUser"]["name"], "Sarah Anderson");
}

#[test]
fn logout_and_reset() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    edash_ok(dir, &["login", "admin@example.com", "admin123"]);
    edash_ok(dir, &["delete", "task-1"]);

    assert_eq!(edash_ok(dir, &["reset"]), "state reset to demo data\n");
    edash_ok(dir, &["login", "admin@example.com", "admin123"]);
    assert!(edash_ok(dir, &["tasks"]).contains("Complete Q1 Budget Review"));

    assert_eq!(edash_ok(dir, &["logout"]), "signed out\n");
    assert!(!dir.join("app_state.json").exists());
    assert_eq!(edash_ok(dir, &["logout"]), "not signed in\n");
}

#[test]
fn companies_search() {
    let tmp = TempDir::new().unwrap();
    let out = edash_ok(tmp.path(), &["companies", "nvid"]);
    assert_eq!(out.lines().count(), 1);
    assert!(out.contains("NVDA"));
    assert_eq!(edash_ok(tmp.path(), &["companies", "a"]), "no matches\n");
}

#[test]
fn config_init_set_show() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();

    edash_ok(dir, &["config", "init"]);
    assert!(dir.join("config.toml").exists());
    let err = edash_err(dir, &["config", "init"]);
    assert!(err.contains("already exists"));

    assert_eq!(
        edash_ok(dir, &["config", "set", "ui.toast_seconds", "9"]),
        "ui.toast_seconds = 9\n"
    );
    let shown = edash_ok(dir, &["config", "show"]);
    assert!(shown.contains("toast_seconds = 9"));

    // Comments from the template survive the edit
    let raw = fs::read_to_string(dir.join("config.toml")).unwrap();
    assert!(raw.contains("# Seconds a notification toast stays on screen"));

    let err = edash_err(dir, &["config", "set", "ui.toast_seconds", "soon"]);
    assert!(err.contains("ui.toast_seconds"));
}
