//! Tests that launch the `roster` binary.
//!
//! None of these need a database: they point the binary at a port nothing
//! listens on, or at a config it must refuse.

use std::path::Path;
use std::process::{Command, Output};

fn roster(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_roster"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("ROSTER_PASSWORD")
        .output()
        .expect("failed to launch roster")
}

#[test]
fn test_unreachable_server_prints_no_rows_and_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = roster(
        &dir.path().join("config.toml"),
        &["mysql://root@127.0.0.1:1/classroom"],
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.stdout.is_empty(), "unexpected stdout: {stderr}");
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("Connection Error"), "stderr: {stderr}");
}

#[test]
fn test_query_text_cannot_be_configured() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(
        &config,
        r#"
[query]
sql = "SELECT enroll_student(3, 'Cara', 22)"
"#,
    )
    .unwrap();

    let output = roster(&config, &["mysql://root@127.0.0.1:1/classroom"]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.stdout.is_empty());
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("Configuration Error"), "stderr: {stderr}");
    assert!(stderr.contains("unknown field `sql`"), "stderr: {stderr}");
}

#[test]
fn test_malformed_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[query\nsql = ").unwrap();

    let output = roster(&config, &[]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("Configuration Error"), "stderr: {stderr}");
}

#[test]
fn test_unknown_named_connection_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let output = roster(&dir.path().join("config.toml"), &["-c", "nowhere"]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("Connection 'nowhere' not found"), "stderr: {stderr}");
}

#[test]
fn test_help_mentions_connection_string() {
    let dir = tempfile::tempdir().unwrap();
    let output = roster(&dir.path().join("config.toml"), &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("CONNECTION_STRING"));
}
