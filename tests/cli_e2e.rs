//! End-to-end CLI tests for chatgraph.
//!
//! These tests run the actual binary against exports written to a temporary
//! directory and check its output, exit code and generated files.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{TempDir, tempdir};

// ============================================================================
// Test Fixtures
// ============================================================================

/// Creates an export root holding one conversation, `alicebob_1a2b`.
fn setup_export() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");
    let thread = dir.path().join("messages").join("inbox").join("alicebob_1a2b");
    fs::create_dir_all(&thread).unwrap();

    let export = r#"{
  "participants": [{"name": "Alice"}, {"name": "Bob"}],
  "title": "Alice and Bob",
  "messages": [
    {"sender_name": "Alice", "timestamp_ms": 1705400000000, "content": "See you tomorrow bob 👍", "type": "Generic"},
    {"sender_name": "Bob", "timestamp_ms": 1705330000000, "content": "Bob started a call.", "call_duration": 321, "type": "Call"},
    {"sender_name": "Bob", "timestamp_ms": 1705320000000, "sticker": {"uri": "messages/stickers_used/369239263222822.png"}, "type": "Generic"},
    {"sender_name": "Alice", "timestamp_ms": 1705314660000, "photos": [{"uri": "messages/photos/1.jpg"}], "type": "Generic"},
    {"sender_name": "Alice", "timestamp_ms": 1705314600000, "content": "Hello Bob! 😂", "type": "Generic"}
  ]
}"#;
    fs::write(thread.join("message_1.json"), export).unwrap();
    dir
}

fn chatgraph() -> Command {
    Command::new(env!("CARGO_BIN_EXE_chatgraph"))
}

fn output_dir(root: &Path) -> std::path::PathBuf {
    root.join("out").join("alicebob_1a2b")
}

// ============================================================================
// Basic functionality
// ============================================================================

#[test]
fn test_url_argument_produces_charts() {
    let dir = setup_export();

    chatgraph()
        .arg("https://www.facebook.com/messages/t/alicebob_1a2b")
        .arg("--export-root")
        .arg(dir.path())
        .arg("--output-root")
        .arg(dir.path().join("out"))
        .assert()
        .success()
        .stdout(predicate::str::contains("✅ Done!"))
        .stdout(predicate::str::contains("Messages:     5"))
        .stdout(predicate::str::contains("stats.json"));

    let out = output_dir(dir.path());
    assert!(out.join("stats.json").is_file());
    assert!(out.join("daily_messages.csv").is_file());
    assert!(out.join("participants.csv").is_file());
    assert!(out.join("sender_messages.svg").is_file());
    assert!(out.join("daily_messages.svg").is_file());
    assert!(out.join("names.svg").is_file());
}

#[test]
fn test_participants_csv_content() {
    let dir = setup_export();

    chatgraph()
        .arg("alicebob_1a2b")
        .arg("-e")
        .arg(dir.path())
        .arg("-o")
        .arg(dir.path().join("out"))
        .assert()
        .success();

    let csv = fs::read_to_string(output_dir(dir.path()).join("participants.csv")).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("Sender;Messages;Words;Media;Other;Characters")
    );
    assert!(lines.next().unwrap().starts_with("Alice;3;"));
    assert!(lines.next().unwrap().starts_with("Bob;2;"));
}

#[test]
fn test_rerun_is_idempotent() {
    let dir = setup_export();
    let run = || {
        chatgraph()
            .arg("alicebob_1a2b")
            .arg("--export-root")
            .arg(dir.path())
            .arg("--output-root")
            .arg(dir.path().join("out"))
            .assert()
            .success();
        fs::read(output_dir(dir.path()).join("stats.json")).unwrap()
    };

    assert_eq!(run(), run());
}

#[test]
fn test_utc_offset_flag() {
    let dir = setup_export();

    chatgraph()
        .arg("alicebob_1a2b")
        .arg("--export-root")
        .arg(dir.path())
        .arg("--output-root")
        .arg(dir.path().join("out"))
        .arg("--utc-offset")
        .arg("-05:00")
        .assert()
        .success()
        .stdout(predicate::str::contains("UTC offset:   -05:00"));
}

// ============================================================================
// Error handling
// ============================================================================

#[test]
fn test_missing_conversation_fails() {
    let dir = setup_export();

    chatgraph()
        .arg("nobody_here")
        .arg("--export-root")
        .arg(dir.path())
        .arg("--output-root")
        .arg(dir.path().join("out"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("❌ Error while reading export"))
        .stderr(predicate::str::contains("not found"));

    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_malformed_export_fails() {
    let dir = tempdir().unwrap();
    let thread = dir.path().join("inbox").join("broken_1");
    fs::create_dir_all(&thread).unwrap();
    fs::write(thread.join("message_1.json"), r#"{"messages": [{"content": "x"}]}"#).unwrap();

    chatgraph()
        .arg("broken_1")
        .arg("--export-root")
        .arg(dir.path())
        .arg("--output-root")
        .arg(dir.path().join("out"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("sender_name"));
}

#[test]
fn test_unwritable_output_fails() {
    let dir = setup_export();
    let blocker = dir.path().join("out_file");
    fs::write(&blocker, "not a directory").unwrap();

    chatgraph()
        .arg("alicebob_1a2b")
        .arg("--export-root")
        .arg(dir.path())
        .arg("--output-root")
        .arg(&blocker)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("❌ Error while rendering charts"));
}

#[test]
fn test_invalid_offset_fails() {
    let dir = setup_export();

    chatgraph()
        .arg("alicebob_1a2b")
        .arg("--export-root")
        .arg(dir.path())
        .arg("--utc-offset")
        .arg("+99:00")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid UTC offset"));
}

#[test]
fn test_missing_argument_shows_usage() {
    chatgraph()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_help() {
    chatgraph()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--export-root"))
        .stdout(predicate::str::contains("--utc-offset"));
}
