//! Integration tests for the `peto` CLI.
//!
//! Each test points `peto` at a temp data directory with `-C`, runs it as a
//! subprocess, and verifies stdout and/or file contents.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tempfile::TempDir;

/// Get the path to the built `peto` binary.
fn peto_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("peto");
    path
}

fn run_peto(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(peto_bin())
        .arg("-C")
        .arg(dir)
        .args(args)
        .env_remove("PETO_HOME")
        .env_remove("PETO_LOG")
        .stdin(Stdio::null())
        .output()
        .expect("failed to run peto");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

fn run_peto_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_peto(dir, args);
    if !success {
        panic!(
            "peto {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

fn run_peto_json(dir: &Path, args: &[&str]) -> serde_json::Value {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    let stdout = run_peto_ok(dir, &full);
    serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("invalid JSON from {:?}: {}\n{}", args, e, stdout))
}

/// Add a task and return its ID
fn add(dir: &Path, text: &str, date: &str) -> u64 {
    let task = run_peto_json(dir, &["add", text, "--date", date]);
    task["id"].as_u64().unwrap()
}

fn stored(dir: &Path) -> serde_json::Value {
    let content = fs::read_to_string(dir.join("todos.json")).unwrap();
    serde_json::from_str(&content).unwrap()
}

// ============================================================================
// add / list
// ============================================================================

#[test]
fn test_add_then_list() {
    let tmp = TempDir::new().unwrap();
    let out = run_peto_ok(tmp.path(), &["add", "Water plants", "--date", "2099-01-02"]);
    assert!(out.starts_with("Task added!"));

    let out = run_peto_ok(tmp.path(), &["list"]);
    assert!(out.contains("[ ] "));
    assert!(out.contains("Water plants"));
    assert!(out.contains("due 02 Jan 2099"));
    assert!(out.contains("1 total, 1 active, 0 done"));
}

#[test]
fn test_newest_first() {
    let tmp = TempDir::new().unwrap();
    let first = add(tmp.path(), "first", "2099-01-01");
    let second = add(tmp.path(), "second", "2099-01-01");
    assert!(second > first);

    let list = run_peto_json(tmp.path(), &["list"]);
    let ids: Vec<u64> = list["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![second, first]);
}

#[test]
fn test_add_escapes_markup_on_disk() {
    let tmp = TempDir::new().unwrap();
    add(tmp.path(), "<b>bold</b> & co", "2099-01-01");

    let data = stored(tmp.path());
    assert_eq!(data["version"], 1);
    assert_eq!(data["tasks"][0]["text"], "&lt;b&gt;bold&lt;/b&gt; &amp; co");

    // Displayed as typed
    let out = run_peto_ok(tmp.path(), &["list"]);
    assert!(out.contains("<b>bold</b> & co"));
}

#[test]
fn test_add_rejects_missing_date() {
    let tmp = TempDir::new().unwrap();
    let (_, stderr, success) = run_peto(tmp.path(), &["add", "no date"]);
    assert!(!success);
    assert!(stderr.contains("error: due date is missing"));
    assert!(!tmp.path().join("todos.json").exists());
}

#[test]
fn test_add_rejects_blank_text_and_bad_date() {
    let tmp = TempDir::new().unwrap();
    let (_, stderr, success) = run_peto(tmp.path(), &["add", "   ", "--date", "2099-01-01"]);
    assert!(!success);
    assert!(stderr.contains("task text is empty"));

    let (_, stderr, success) = run_peto(tmp.path(), &["add", "x", "--date", "2099-02-30"]);
    assert!(!success);
    assert!(stderr.contains("invalid due date"));
}

#[test]
fn test_list_empty_messages() {
    let tmp = TempDir::new().unwrap();
    let out = run_peto_ok(tmp.path(), &["list"]);
    assert_eq!(out, "No tasks yet. Add one now!\n");

    add(tmp.path(), "only", "2099-01-01");
    let out = run_peto_ok(tmp.path(), &["list", "--filter", "done"]);
    assert!(out.contains("No completed tasks yet."));
    assert!(out.contains("1 total, 1 active, 0 done"));
}

#[test]
fn test_list_marks_overdue() {
    let tmp = TempDir::new().unwrap();
    add(tmp.path(), "late", "2000-01-01");
    let list = run_peto_json(tmp.path(), &["list"]);
    assert_eq!(list["tasks"][0]["overdue"], true);
    let out = run_peto_ok(tmp.path(), &["list"]);
    assert!(out.contains("overdue 01 Jan 2000"));
}

// ============================================================================
// toggle / delete / clear
// ============================================================================

#[test]
fn test_toggle_moves_between_filters() {
    let tmp = TempDir::new().unwrap();
    let id = add(tmp.path(), "finish me", "2000-01-01");
    let id_str = id.to_string();

    let out = run_peto_ok(tmp.path(), &["toggle", &id_str]);
    assert!(out.contains("marked done"));

    let done = run_peto_json(tmp.path(), &["list", "--filter", "done"]);
    assert_eq!(done["tasks"][0]["id"], id);
    // Done tasks are never overdue
    assert_eq!(done["tasks"][0]["overdue"], false);
    let active = run_peto_json(tmp.path(), &["list", "--filter", "active"]);
    assert_eq!(active["tasks"].as_array().unwrap().len(), 0);
    assert_eq!(active["empty_message"], "No active tasks!");

    run_peto_ok(tmp.path(), &["toggle", &id_str]);
    assert_eq!(stored(tmp.path())["tasks"][0]["done"], false);
}

#[test]
fn test_delete() {
    let tmp = TempDir::new().unwrap();
    let keep = add(tmp.path(), "keep", "2099-01-01");
    let gone = add(tmp.path(), "gone", "2099-01-01");

    let out = run_peto_ok(tmp.path(), &["delete", &gone.to_string()]);
    assert_eq!(out, "Task deleted.\n");

    let data = stored(tmp.path());
    let tasks = data["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["id"], keep);
}

#[test]
fn test_unknown_id_is_a_warning() {
    let tmp = TempDir::new().unwrap();
    add(tmp.path(), "keep", "2099-01-01");

    let (_, stderr, success) = run_peto(tmp.path(), &["delete", "42"]);
    assert!(success);
    assert!(stderr.contains("no task with ID 42"));

    let (_, stderr, success) = run_peto(tmp.path(), &["toggle", "42"]);
    assert!(success);
    assert!(stderr.contains("no task with ID 42"));
    assert_eq!(stored(tmp.path())["tasks"].as_array().unwrap().len(), 1);
}

#[test]
fn test_clear_with_yes() {
    let tmp = TempDir::new().unwrap();
    add(tmp.path(), "a", "2099-01-01");
    add(tmp.path(), "b", "2099-01-01");

    let out = run_peto_json(tmp.path(), &["clear", "--yes"]);
    assert_eq!(out["removed"], 2);
    assert_eq!(stored(tmp.path())["tasks"].as_array().unwrap().len(), 0);
    assert_eq!(
        run_peto_ok(tmp.path(), &["list"]),
        "No tasks yet. Add one now!\n"
    );
}

#[test]
fn test_clear_declined_without_tty_answer() {
    let tmp = TempDir::new().unwrap();
    add(tmp.path(), "a", "2099-01-01");

    // stdin is closed, so the prompt reads no answer
    let out = run_peto_ok(tmp.path(), &["clear"]);
    assert_eq!(out, "Nothing deleted.\n");
    assert_eq!(stored(tmp.path())["tasks"].as_array().unwrap().len(), 1);
}

#[test]
fn test_clear_empty_warns() {
    let tmp = TempDir::new().unwrap();
    let (stdout, stderr, success) = run_peto(tmp.path(), &["clear", "--yes"]);
    assert!(success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("There are no tasks to delete."));
    assert!(!tmp.path().join("todos.json").exists());
}

// ============================================================================
// stats / theme
// ============================================================================

#[test]
fn test_stats() {
    let tmp = TempDir::new().unwrap();
    let a = add(tmp.path(), "a", "2099-01-01");
    add(tmp.path(), "b", "2099-01-01");
    run_peto_ok(tmp.path(), &["toggle", &a.to_string()]);

    assert_eq!(
        run_peto_ok(tmp.path(), &["stats"]),
        "2 total, 1 active, 1 done\n"
    );
    let stats = run_peto_json(tmp.path(), &["stats"]);
    assert_eq!(stats["total"], 2);
    assert_eq!(stats["active"], 1);
    assert_eq!(stats["done"], 1);
}

#[test]
fn test_theme_persists() {
    let tmp = TempDir::new().unwrap();
    assert_eq!(run_peto_ok(tmp.path(), &["theme"]), "light\n");
    assert_eq!(run_peto_ok(tmp.path(), &["theme", "toggle"]), "dark\n");
    assert_eq!(run_peto_ok(tmp.path(), &["theme"]), "dark\n");

    let config = fs::read_to_string(tmp.path().join("config.toml")).unwrap();
    assert!(config.contains("theme = \"dark\""));

    run_peto_ok(tmp.path(), &["theme", "light"]);
    let theme = run_peto_json(tmp.path(), &["theme"]);
    assert_eq!(theme["theme"], "light");
}

#[test]
fn test_theme_edit_keeps_other_settings() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("config.toml"),
        "# my settings\n[ui]\ntheme = \"light\"\n\n[log]\nlevel = \"debug\"\n",
    )
    .unwrap();
    run_peto_ok(tmp.path(), &["theme", "dark"]);

    let config = fs::read_to_string(tmp.path().join("config.toml")).unwrap();
    assert!(config.contains("# my settings"));
    assert!(config.contains("level = \"debug\""));
    assert!(config.contains("theme = \"dark\""));
}

#[test]
fn test_malformed_config_does_not_block_tasks() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[ui\ntheme = ").unwrap();

    let (_, stderr, success) = run_peto(tmp.path(), &["add", "still works", "--date", "2099-01-01"]);
    assert!(success);
    assert!(stderr.contains("warning: ignoring config"));
    let out = run_peto_ok(tmp.path(), &["list"]);
    assert!(out.contains("still works"));

    // Setting the theme repairs the file
    assert_eq!(run_peto_ok(tmp.path(), &["theme", "dark"]), "dark\n");
    let (_, stderr, _) = run_peto(tmp.path(), &["theme"]);
    assert!(!stderr.contains("warning"));
    assert!(tmp.path().join("config.toml.bak").exists());
}

// ============================================================================
// data file handling
// ============================================================================

#[test]
fn test_legacy_array_is_read() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("todos.json"),
        r#"[{"id":5,"text":"old","date":"2099-03-04","done":true}]"#,
    )
    .unwrap();

    let list = run_peto_json(tmp.path(), &["list"]);
    assert_eq!(list["tasks"][0]["id"], 5);
    assert_eq!(list["tasks"][0]["done"], true);

    // Next write upgrades to the versioned layout
    add(tmp.path(), "new", "2099-01-01");
    let data = stored(tmp.path());
    assert_eq!(data["version"], 1);
    assert_eq!(data["tasks"].as_array().unwrap().len(), 2);
}

#[test]
fn test_corrupt_file_starts_empty_and_is_backed_up() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("todos.json"), "{not json").unwrap();

    let out = run_peto_ok(tmp.path(), &["list"]);
    assert_eq!(out, "No tasks yet. Add one now!\n");
    assert_eq!(
        fs::read_to_string(tmp.path().join("todos.json.bak")).unwrap(),
        "{not json"
    );
}

#[test]
fn test_logs_go_to_data_dir() {
    let tmp = TempDir::new().unwrap();
    add(tmp.path(), "a", "2099-01-01");
    assert!(tmp.path().join("logs").is_dir());
}
