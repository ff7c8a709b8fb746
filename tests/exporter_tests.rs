// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use pocketbook::commands::exporter;
use pocketbook::schedule::{self, Frequency};
use pocketbook::session::{Clock, Session};
use pocketbook::{cli, db};
use rusqlite::Connection;
use serde_json::json;
use std::path::Path;
use tempfile::tempdir;

fn session_at(dir: &Path, now: &str) -> Session {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let now = NaiveDateTime::parse_from_str(now, "%Y-%m-%dT%H:%M:%S").unwrap();
    Session::new(conn, dir.to_path_buf(), Clock::Fixed(now))
}

fn run(s: &mut Session, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["pocketbook"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    s.dispatch(&matches)
}

fn seed(s: &mut Session) {
    run(s, &["tx", "add", "--title", "Corner shop, late", "--amount", "12.34", "--category", "Food", "--date", "2025-01-02T18:30:00"]).unwrap();
    run(s, &["tx", "add", "--title", "Payroll", "--amount", "2000", "--category", "Salary", "--type", "income", "--date", "2025-01-01"]).unwrap();
}

#[test]
fn csv_export_uses_fixed_header_and_store_order() {
    let dir = tempdir().unwrap();
    let mut s = session_at(dir.path(), "2025-01-05T10:00:00");
    seed(&mut s);
    let out = dir.path().join("tx.csv");
    run(&mut s, &["export", "transactions", "--out", out.to_str().unwrap()]).unwrap();

    let contents = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<_> = contents.lines().collect();
    assert_eq!(
        lines,
        [
            "Title,Amount,Category,Type,Date",
            "\"Corner shop, late\",12.34,Food,expense,2025-01-02T18:30:00",
            "Payroll,2000,Salary,income,2025-01-01T00:00:00",
        ]
    );
}

#[test]
fn json_export_lists_the_same_rows() {
    let dir = tempdir().unwrap();
    let mut s = session_at(dir.path(), "2025-01-05T10:00:00");
    seed(&mut s);
    let out = dir.path().join("tx.json");
    run(&mut s, &["export", "transactions", "--format", "json", "--out", out.to_str().unwrap()]).unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(
        parsed[1],
        json!({
            "title": "Payroll",
            "amount": "2000",
            "category": "Salary",
            "type": "income",
            "date": "2025-01-01T00:00:00"
        })
    );
}

#[test]
fn unknown_format_is_an_error_and_writes_nothing() {
    let dir = tempdir().unwrap();
    let mut s = session_at(dir.path(), "2025-01-05T10:00:00");
    seed(&mut s);
    let out = dir.path().join("tx.xml");
    let err = run(&mut s, &["export", "transactions", "--format", "xml", "--out", out.to_str().unwrap()])
        .unwrap_err();
    assert!(err.to_string().contains("Unknown format"));
    assert!(!out.exists());
}

#[test]
fn schedule_settings_are_validated_and_persisted() {
    let dir = tempdir().unwrap();
    let mut s = session_at(dir.path(), "2025-01-05T10:00:00");

    assert!(run(&mut s, &["export", "schedule", "set", "--frequency", "weekly"]).is_err());
    assert!(run(&mut s, &["export", "schedule", "set", "--frequency", "monthly", "--on", "32"]).is_err());
    assert!(run(&mut s, &["export", "schedule", "set", "--frequency", "biweekly", "--on", "every-other"]).is_err());
    assert!(!schedule::load_config(&s.conn).unwrap().enabled);

    run(&mut s, &["export", "schedule", "set", "--frequency", "weekly", "--on", "Sunday"]).unwrap();
    let cfg = schedule::load_config(&s.conn).unwrap();
    assert!(cfg.enabled);
    assert_eq!(cfg.frequency, Frequency::Weekly);
    assert_eq!(cfg.sub_frequency.as_deref(), Some("Sunday"));

    let raw: String = s
        .conn
        .query_row(
            "SELECT value FROM settings WHERE key='automatic_export_config'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert!(raw.contains("\"subFrequency\":\"Sunday\""));

    run(&mut s, &["export", "schedule", "off"]).unwrap();
    let cfg = schedule::load_config(&s.conn).unwrap();
    assert!(!cfg.enabled);
    assert_eq!(cfg.frequency, Frequency::Weekly);
}

#[test]
fn scheduled_export_waits_for_transactions() {
    let dir = tempdir().unwrap();
    let mut s = session_at(dir.path(), "2025-01-05T10:00:00");
    run(&mut s, &["export", "schedule", "set", "--frequency", "daily"]).unwrap();

    assert!(exporter::run_scheduled_export(&s).unwrap().is_none());
    assert!(schedule::last_export(&s.conn).unwrap().is_none());
    assert!(!dir.path().join("exports").join("transactions_2025-01-05.csv").exists());

    seed(&mut s);
    let path = exporter::run_scheduled_export(&s).unwrap().unwrap();
    assert!(path.ends_with("transactions_2025-01-05.csv"));
}

#[test]
fn scheduled_export_runs_once_on_a_due_day() {
    let dir = tempdir().unwrap();
    // 2025-01-05 is a Sunday.
    let mut s = session_at(dir.path(), "2025-01-05T10:00:00");
    seed(&mut s);
    assert!(exporter::run_scheduled_export(&s).unwrap().is_none());

    run(&mut s, &["export", "schedule", "set", "--frequency", "weekly", "--on", "sunday"]).unwrap();
    let path = exporter::run_scheduled_export(&s).unwrap().unwrap();
    assert_eq!(path, dir.path().join("exports").join("transactions_2025-01-05.csv"));
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("Title,Amount,Category,Type,Date"));

    assert!(exporter::run_scheduled_export(&s).unwrap().is_none());
    let last = schedule::last_export(&s.conn).unwrap().unwrap();
    assert_eq!(last.to_string(), "2025-01-05 10:00:00");
}
