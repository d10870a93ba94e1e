//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with HOME pointed at a temporary directory,
//! so every run gets a fresh `~/.config/studygate`.

use std::io::Write;
use std::process::{Command, Stdio};

use tempfile::TempDir;

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(home: &TempDir, args: &[&str]) -> (i32, String, String) {
    run_cli_with_input(home, args, "")
}

fn run_cli_with_input(home: &TempDir, args: &[&str], input: &str) -> (i32, String, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_studygate"))
        .args(args)
        .env("HOME", home.path())
        .env_remove("STUDYGATE_ENV")
        .env("RUST_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    {
        let mut stdin = child.stdin.take().unwrap();
        stdin.write_all(input.as_bytes()).unwrap();
    }

    let output = child.wait_with_output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (output.status.code().unwrap_or(-1), stdout, stderr)
}

fn json_lines(stdout: &str) -> Vec<serde_json::Value> {
    stdout
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).expect("stdout line is not JSON"))
        .collect()
}

#[test]
fn test_blocklist_list_seeds_defaults() {
    let home = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(&home, &["blocklist", "list"]);
    assert_eq!(code, 0);
    let domains: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        domains,
        vec!["instagram.com", "youtube.com", "facebook.com", "whatsapp.com", "tiktok.com"]
    );
    assert!(home.path().join(".config/studygate/blocked_sites.json").exists());
}

#[test]
fn test_blocklist_add_and_remove() {
    let home = TempDir::new().unwrap();
    let (code, _, _) = run_cli(&home, &["blocklist", "add", " WWW.Reddit.COM "]);
    assert_eq!(code, 0);
    let (code, _, _) = run_cli(&home, &["blocklist", "remove", "youtube.com"]);
    assert_eq!(code, 0);

    let (_, stdout, _) = run_cli(&home, &["blocklist", "list", "--json"]);
    let domains: Vec<String> = serde_json::from_str(&stdout).unwrap();
    assert!(domains.contains(&"reddit.com".to_string()));
    assert!(!domains.contains(&"youtube.com".to_string()));
}

#[test]
fn test_check_reports_verdict() {
    let home = TempDir::new().unwrap();

    let (code, stdout, _) = run_cli(&home, &["check", "https://m.youtube.com/feed"]);
    assert_eq!(code, 0);
    let out: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(out["allowed"], false);
    assert_eq!(out["host"], "m.youtube.com");

    let (_, stdout, _) = run_cli(&home, &["check", "youtube.com", "--phase", "on-break"]);
    let out: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(out["allowed"], true);
}

#[test]
fn test_config_set_and_get() {
    let home = TempDir::new().unwrap();
    let (code, _, _) = run_cli(&home, &["config", "set", "session.study_minutes", "50"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(&home, &["config", "get", "session.study_minutes"]);
    assert_eq!(stdout.trim(), "50");

    let (code, _, stderr) = run_cli(&home, &["config", "set", "session.break_minutes", "0"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("break_minutes"));
}

#[test]
fn test_session_rejects_invalid_minutes() {
    let home = TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(&home, &["session", "run", "--study", "0", "--no-record"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("study_minutes"));
}

#[test]
fn test_session_run_gates_and_records() {
    let home = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli_with_input(
        &home,
        &["session", "run", "--study", "1", "--break", "1", "--tick-ms", "5"],
        "youtube.com\nhttps://docs.rs\n",
    );
    assert_eq!(code, 0);

    let lines = json_lines(&stdout);
    assert_eq!(lines.first().unwrap()["type"], "SessionStarted");
    assert_eq!(lines.last().unwrap()["type"], "BreakEnded");

    let verdicts: Vec<&serde_json::Value> =
        lines.iter().filter(|l| l.get("verdict").is_some()).collect();
    assert_eq!(verdicts.len(), 2);
    assert_eq!(verdicts[0]["verdict"]["verdict"], "deny");
    assert_eq!(verdicts[1]["verdict"]["verdict"], "allow");
    assert_eq!(
        lines.iter().filter(|l| l["type"] == "StudyCompleted").count(),
        1
    );

    let (_, stdout, _) = run_cli(&home, &["history", "--json"]);
    let sessions: Vec<serde_json::Value> = serde_json::from_str(&stdout).unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["study_minutes"], 1);
}

#[test]
fn test_session_stop_command_ends_without_record() {
    let home = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli_with_input(
        &home,
        &["session", "run", "--study", "30", "--tick-ms", "1000"],
        "stop\n",
    );
    assert_eq!(code, 0);
    let lines = json_lines(&stdout);
    assert_eq!(lines.last().unwrap()["type"], "SessionStopped");

    let (_, stdout, _) = run_cli(&home, &["history"]);
    assert_eq!(stdout.trim(), "no completed sessions");
}

#[test]
fn test_unopenable_database_reports_persistence_error() {
    let home = TempDir::new().unwrap();
    let blocker = home.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();
    let db_path = blocker.join("productivity.db");

    let (code, _, _) = run_cli(
        &home,
        &["config", "set", "storage.database_path", db_path.to_str().unwrap()],
    );
    assert_eq!(code, 0);

    let (code, _, stderr) = run_cli(&home, &["history"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Persistence error"), "stderr: {stderr}");
}

#[cfg(unix)]
#[test]
fn test_interrupt_stops_running_session() {
    let home = TempDir::new().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_studygate"))
        .args(["session", "run", "--study", "30", "--tick-ms", "20", "--no-record"])
        .env("HOME", home.path())
        .env_remove("STUDYGATE_ENV")
        .env("RUST_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");
    // Keep stdin open so only the signal can end the loop.
    let _stdin = child.stdin.take().unwrap();

    std::thread::sleep(std::time::Duration::from_millis(500));
    let status = Command::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());

    let output = child.wait_with_output().unwrap();
    assert_eq!(output.status.code(), Some(0));
    let lines = json_lines(&String::from_utf8_lossy(&output.stdout));
    assert_eq!(lines.last().unwrap()["type"], "SessionStopped");
}
