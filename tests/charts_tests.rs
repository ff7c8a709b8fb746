// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use pocketbook::session::{Clock, Session};
use pocketbook::{cli, db};
use rusqlite::Connection;
use tempfile::tempdir;

fn session() -> Session {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let now = NaiveDateTime::parse_from_str("2025-03-20T09:00:00", "%Y-%m-%dT%H:%M:%S").unwrap();
    Session::new(conn, std::env::temp_dir(), Clock::Fixed(now))
}

fn run(s: &mut Session, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["pocketbook"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    s.dispatch(&matches)
}

#[test]
fn total_chart_without_history_is_not_an_error() {
    let mut s = session();
    let dir = tempdir().unwrap();
    let out = dir.path().join("total.html");
    run(&mut s, &["chart", "total", "--html", out.to_str().unwrap()]).unwrap();
    assert!(!out.exists());
    assert!(s.charts.current().is_none());
}

#[test]
fn each_new_chart_replaces_the_previous_one() {
    let mut s = session();
    run(&mut s, &["tx", "add", "--title", "Bus", "--amount", "2", "--category", "Transport", "--date", "2025-03-01"]).unwrap();
    run(&mut s, &["tx", "add", "--title", "Pay", "--amount", "900", "--category", "Salary", "--type", "income", "--date", "2025-03-02"]).unwrap();
    let dir = tempdir().unwrap();

    let total = dir.path().join("total.html");
    run(&mut s, &["chart", "total", "--html", total.to_str().unwrap()]).unwrap();
    assert_eq!(s.charts.current().unwrap().id, "evolution-chart");
    let html = std::fs::read_to_string(&total).unwrap();
    assert!(html.contains("2025-03-01"));
    assert!(html.contains("2025-03-02"));

    let cat = dir.path().join("transport.html");
    run(&mut s, &["chart", "category", "--name", "Transport", "--html", cat.to_str().unwrap()]).unwrap();
    let current = s.charts.current().unwrap().options();
    assert!(current.contains("Transport"));
    assert!(!current.contains("2025-03-02"));
    assert!(std::fs::read_to_string(&cat).unwrap().contains("Transport"));
}
