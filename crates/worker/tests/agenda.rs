//! Integration tests for the one-shot agenda run.
//!
//! Uses the bundled sample feed, which mixes sent, accepted, draft, and
//! malformed quotes.

use std::io::Write;
use std::path::PathBuf;

use chrono::NaiveDate;
use followup_core::generation::ReminderSchedule;
use followup_worker::agenda::{build_agenda, load_quotes};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/sample_quotes.json")
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn sample_feed_produces_expected_agenda() {
    let quotes = load_quotes(&fixture()).unwrap();
    assert_eq!(quotes.len(), 5);

    let agenda = build_agenda(quotes, ReminderSchedule::default(), d(2025, 1, 28)).unwrap();

    assert_eq!(agenda.report.quotes_scanned, 5);
    assert_eq!(agenda.report.malformed_quotes, 1);
    assert_eq!(agenda.report.inserted, 5);

    let overdue: Vec<&str> = agenda.buckets.overdue.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(
        overdue,
        vec!["2-expiration_warning", "1-follow_up_1", "2-initial"]
    );
    let due_today: Vec<&str> = agenda.buckets.due_today.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(due_today, vec!["2-follow_up_1"]);
    assert_eq!(agenda.counts.upcoming, 0);
}

#[test]
fn agenda_serializes_bucket_counts() {
    let quotes = load_quotes(&fixture()).unwrap();
    let agenda = build_agenda(quotes, ReminderSchedule::default(), d(2025, 1, 28)).unwrap();

    let json = serde_json::to_value(&agenda).unwrap();
    assert_eq!(json["date"], "2025-01-28");
    assert_eq!(json["counts"]["overdue"], 3);
    assert_eq!(json["counts"]["due_today"], 1);
    assert_eq!(json["buckets"]["due_today"][0]["reminder_type"], "follow_up_1");
    assert_eq!(json["buckets"]["overdue"][0]["priority"], "urgent");
}

#[test]
fn missing_feed_reports_path() {
    let err = load_quotes(&PathBuf::from("/nonexistent/quotes.json")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/quotes.json"));
}

#[test]
fn invalid_feed_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"[{{"id": 1, "status": "won"}}]"#).unwrap();
    let err = load_quotes(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse quote feed"));
}
