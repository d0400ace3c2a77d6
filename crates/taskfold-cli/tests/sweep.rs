use std::process::Command;

use serde_json::Value;
use tempfile::TempDir;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_taskfold"))
}

#[test]
fn sweep_moves_completed_tasks_into_the_archive() {
    let vault = TempDir::new().expect("vault");
    std::fs::write(
        vault.path().join("Todo.md"),
        "# Todo\n- [x] clean desk\n- [ ] water plants",
    )
    .expect("todo");

    let output = bin()
        .arg("--vault")
        .arg(vault.path())
        .arg("sweep")
        .arg("Todo.md")
        .arg("--json")
        .output()
        .expect("sweep");
    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(report["outcome"], "archived");
    assert_eq!(report["tasks"], 1);

    let todo = std::fs::read_to_string(vault.path().join("Todo.md")).expect("todo");
    assert_eq!(todo, "# Todo\n- [ ] water plants");
    let archive = std::fs::read_to_string(vault.path().join("Archive.md")).expect("archive");
    assert!(archive.starts_with("# Task Archive\n- [x] clean desk | Completed: "));
}

#[test]
fn sweep_respects_the_todo_scope() {
    let vault = TempDir::new().expect("vault");
    std::fs::write(vault.path().join("Scratch.md"), "- [x] done").expect("note");

    let output = bin()
        .arg("--vault")
        .arg(vault.path())
        .arg("sweep")
        .arg("Scratch.md")
        .arg("--json")
        .output()
        .expect("sweep");
    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(report["outcome"], "out_of_scope");
    assert!(!vault.path().join("Archive.md").exists());
}

#[test]
fn sweep_without_completed_tasks_reports_nothing_to_do() {
    let vault = TempDir::new().expect("vault");
    std::fs::write(vault.path().join("Todo.md"), "- [ ] open").expect("todo");

    let output = bin()
        .arg("--vault")
        .arg(vault.path())
        .arg("sweep")
        .arg("Todo.md")
        .output()
        .expect("sweep");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert_eq!(stdout.trim(), "No completed tasks found");
}

#[test]
fn sweep_honors_settings_file() {
    let vault = TempDir::new().expect("vault");
    std::fs::write(
        vault.path().join(".taskfold.toml"),
        "archive_path = \"Done\"\ntodo_path = \"\"\nwith_timestamp = false\nrecurring_task_path = \"Tasks\"\n",
    )
    .expect("settings");
    std::fs::write(vault.path().join("Inbox.md"), "- [x] ship it").expect("note");

    let output = bin()
        .arg("--vault")
        .arg(vault.path())
        .arg("sweep")
        .arg("Inbox.md")
        .arg("--json")
        .output()
        .expect("sweep");
    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(report["outcome"], "archived");

    let archive = std::fs::read_to_string(vault.path().join("Done.md")).expect("archive");
    assert_eq!(archive, "# Task Archive\n- [x] ship it");
}
