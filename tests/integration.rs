//! Integration tests: reader, aggregator and renderer on exports written to a
//! temporary directory.

use std::fs;
use std::path::{Path, PathBuf};

use chatgraph::config::PipelineConfig;
use chatgraph::prelude::*;
use chatgraph::render::{DAILY_FILE, PARTICIPANTS_FILE, STATS_FILE};
use chrono::NaiveDate;
use tempfile::TempDir;

// ============================================================================
// Fixtures
// ============================================================================

/// 2024-01-01 10:00 UTC (Monday)
const DAY1: i64 = 1_704_103_200_000;
/// 2024-01-02 10:00 UTC (Tuesday)
const DAY2: i64 = 1_704_189_600_000;

fn record(sender: &str, ts: i64, content: &str) -> String {
    format!(
        r#"{{"sender_name": "{sender}", "timestamp_ms": {ts}, "content": "{content}", "type": "Generic"}}"#
    )
}

fn export_file(title: &str, records: &[String]) -> String {
    format!(
        r#"{{"participants": [{{"name": "Alice"}}, {{"name": "Bob"}}], "title": "{title}", "messages": [{}]}}"#,
        records.join(",\n")
    )
}

/// Writes the scenario conversation: A "hi" and B "hey" on day 1, A "bye" on
/// day 2. Records are stored newest first, as Messenger does.
fn write_scenario(root: &Path, id: &str) -> PathBuf {
    let thread = root.join("messages").join("inbox").join(id);
    fs::create_dir_all(&thread).unwrap();
    let records = [
        record("A", DAY2, "bye"),
        record("B", DAY1 + 60_000, "hey"),
        record("A", DAY1, "hi"),
    ];
    fs::write(thread.join("message_1.json"), export_file("A and B", &records)).unwrap();
    thread
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn config(root: &TempDir, reference: &str) -> PipelineConfig {
    PipelineConfig::new(reference)
        .with_export_root(root.path())
        .with_output_root(root.path().join("output"))
}

// ============================================================================
// Reader
// ============================================================================

#[test]
fn test_reader_scenario() {
    let dir = TempDir::new().unwrap();
    write_scenario(dir.path(), "ab_1");

    let conversation = ExportReader::new().read(dir.path(), "ab_1").unwrap();

    assert_eq!(conversation.title(), Some("A and B"));
    assert_eq!(conversation.len(), 3);
    let texts: Vec<_> = conversation
        .messages()
        .iter()
        .map(|m| m.text_content().unwrap())
        .collect();
    assert_eq!(texts, ["hi", "hey", "bye"]);
    assert_eq!(
        conversation.participants().iter().collect::<Vec<_>>(),
        ["A", "B"]
    );
}

#[test]
fn test_reader_multiple_files_in_order() {
    let dir = TempDir::new().unwrap();
    let thread = dir.path().join("messages").join("inbox").join("multi_1");
    fs::create_dir_all(&thread).unwrap();

    // message_1 holds the newest messages, message_10 the oldest.
    let files = [(1, DAY1 + 3_000), (2, DAY1 + 2_000), (10, DAY1)];
    for (n, ts) in files {
        let records = [record("Alice", ts, &format!("from file {n}"))];
        fs::write(
            thread.join(format!("message_{n}.json")),
            export_file("Multi", &records),
        )
        .unwrap();
    }

    let conversation = ExportReader::new().read(dir.path(), "multi_1").unwrap();
    let texts: Vec<_> = conversation
        .messages()
        .iter()
        .map(|m| m.text_content().unwrap())
        .collect();
    assert_eq!(texts, ["from file 10", "from file 2", "from file 1"]);
}

#[test]
fn test_reader_accepts_url_and_paths() {
    let dir = TempDir::new().unwrap();
    let thread = write_scenario(dir.path(), "url_1");
    let reader = ExportReader::new();

    let by_url = reader
        .read(dir.path(), "https://www.facebook.com/messages/t/url_1/?ref=share")
        .unwrap();
    let by_folder = reader
        .read(Path::new("."), thread.to_str().unwrap())
        .unwrap();
    let by_file = reader
        .read(Path::new("."), thread.join("message_1.json").to_str().unwrap())
        .unwrap();

    assert_eq!(by_url, by_folder);
    assert_eq!(by_folder, by_file);
}

#[test]
fn test_reader_archived_threads() {
    let dir = TempDir::new().unwrap();
    let thread = dir.path().join("messages").join("archived_threads").join("old_1");
    fs::create_dir_all(&thread).unwrap();
    fs::write(
        thread.join("message_1.json"),
        export_file("Old", &[record("Alice", DAY1, "still here")]),
    )
    .unwrap();

    let conversation = ExportReader::new().read(dir.path(), "old_1").unwrap();
    assert_eq!(conversation.len(), 1);
}

#[test]
fn test_reader_fixes_mojibake() {
    let dir = TempDir::new().unwrap();
    let thread = dir.path().join("inbox").join("moji_1");
    fs::create_dir_all(&thread).unwrap();
    // "Zoë" and "café" exported as Latin-1 code points of their UTF-8 bytes.
    fs::write(
        thread.join("message_1.json"),
        export_file("t", &[record("Zo\\u00c3\\u00ab", DAY1, "caf\\u00c3\\u00a9")]),
    )
    .unwrap();

    let fixed = ExportReader::new().read(dir.path(), "moji_1").unwrap();
    assert_eq!(fixed.messages()[0].sender(), "Zoë");
    assert_eq!(fixed.messages()[0].text_content(), Some("café"));

    let raw = ExportReader::with_config(ReaderConfig::new().with_fix_encoding(false))
        .read(dir.path(), "moji_1")
        .unwrap();
    assert_eq!(raw.messages()[0].sender(), "Zo\u{c3}\u{ab}");
}

#[test]
fn test_reader_parse_error_names_file() {
    let dir = TempDir::new().unwrap();
    let thread = dir.path().join("messages").join("inbox").join("bad_1");
    fs::create_dir_all(&thread).unwrap();
    fs::write(thread.join("message_1.json"), "{ not json").unwrap();

    let err = ExportReader::new().read(dir.path(), "bad_1").unwrap_err();

    assert!(err.is_parse());
    assert!(err.to_string().contains("message_1.json"));
}

// ============================================================================
// Aggregation
// ============================================================================

#[test]
fn test_scenario_counts() {
    let dir = TempDir::new().unwrap();
    write_scenario(dir.path(), "ab_2");
    let conversation = ExportReader::new().read(dir.path(), "ab_2").unwrap();

    let stats = aggregate(&conversation, &AggregateConfig::default());

    let counts: Vec<_> = stats
        .participants
        .iter()
        .map(|p| (p.name.as_str(), p.messages))
        .collect();
    assert_eq!(counts, [("A", 2), ("B", 1)]);

    let daily: Vec<_> = stats.daily.iter().map(|d| (d.date, d.messages)).collect();
    assert_eq!(daily, [(date(2024, 1, 1), 2), (date(2024, 1, 2), 1)]);

    assert_eq!(stats.participant_names(), ["A", "B"]);
    let streak = stats.longest_streak.unwrap();
    assert_eq!(streak.days, 2);
}

#[test]
fn test_utc_offset_moves_day_boundary() {
    let dir = TempDir::new().unwrap();
    write_scenario(dir.path(), "ab_3");
    let conversation = ExportReader::new().read(dir.path(), "ab_3").unwrap();

    // 10:00 UTC is 00:00 the next day at +14:00.
    let config = AggregateConfig::new().with_utc_offset("+14:00").unwrap();
    let stats = aggregate(&conversation, &config);

    assert_eq!(stats.daily[0].date, date(2024, 1, 2));
    assert_eq!(stats.hourly[0].total, 3);
}

// ============================================================================
// Full pipeline
// ============================================================================

#[test]
fn test_pipeline_writes_everything() {
    let dir = TempDir::new().unwrap();
    write_scenario(dir.path(), "ab_4");

    let report = run(&config(&dir, "https://www.facebook.com/messages/t/ab_4")).unwrap();

    let out = dir.path().join("output").join("ab_4");
    assert_eq!(report.output_dir, out);
    for name in [STATS_FILE, DAILY_FILE, PARTICIPANTS_FILE] {
        assert!(out.join(name).is_file(), "missing {name}");
    }
    for chart in [
        "sender_messages",
        "sender_words",
        "sender_media",
        "daily_messages",
        "weekday_messages",
        "time_in_day_messages",
        "top_days_messages",
        "per_term_messages",
        "top_stickers",
        "call_duration",
        "emoji_total",
        "names",
    ] {
        assert!(out.join(format!("{chart}.svg")).is_file(), "missing {chart}");
    }

    let daily = fs::read_to_string(out.join(DAILY_FILE)).unwrap();
    assert_eq!(daily, "Date;Messages\n2024-01-01;2\n2024-01-02;1\n");
}

#[test]
fn test_pipeline_is_idempotent() {
    let dir = TempDir::new().unwrap();
    write_scenario(dir.path(), "ab_5");
    let config = config(&dir, "ab_5");

    let first = run(&config).unwrap();
    let snapshot: Vec<Vec<u8>> = first
        .render
        .data_files
        .iter()
        .map(|p| fs::read(p).unwrap())
        .collect();

    let second = run(&config).unwrap();
    let again: Vec<Vec<u8>> = second
        .render
        .data_files
        .iter()
        .map(|p| fs::read(p).unwrap())
        .collect();

    assert_eq!(snapshot, again);
}

#[test]
fn test_round_trip_through_output_dir() {
    let dir = TempDir::new().unwrap();
    write_scenario(dir.path(), "ab_6");

    let report = run(&config(&dir, "ab_6")).unwrap();

    assert_eq!(read_stats(&report.output_dir).unwrap(), report.stats);
}

#[test]
fn test_missing_conversation_creates_nothing() {
    let dir = TempDir::new().unwrap();

    let err = run(&config(&dir, "does_not_exist_42")).unwrap_err();

    assert!(err.source.is_not_found());
    assert!(!dir.path().join("output").exists());
}

#[test]
fn test_output_dir_name_is_sanitized() {
    let dir = TempDir::new().unwrap();
    write_scenario(dir.path(), "weird name!");

    let report = run(&config(&dir, "weird name!")).unwrap();

    assert_eq!(report.output_dir, dir.path().join("output").join("weird_name_-c3ead39e"));
}
