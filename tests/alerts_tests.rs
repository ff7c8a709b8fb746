// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use pocketbook::commands::{notifications, transactions};
use pocketbook::engine::AlertRuleKind;
use pocketbook::session::{Clock, Session};
use pocketbook::{cli, db};
use rusqlite::Connection;
use rust_decimal::Decimal;

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

fn add(s: &mut Session, args: &[&str]) -> Vec<String> {
    let mut argv = vec!["pocketbook", "tx", "add"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let (_, tx) = matches.subcommand().unwrap();
    let (_, sub) = tx.subcommand().unwrap();
    transactions::add(s, sub).unwrap()
}

#[test]
fn income_share_alert_fires_when_a_transaction_crosses_it() {
    let mut s = session();
    run(&mut s, &["alerts", "set", "--rule", "a", "--on", "--percentage", "50"]).unwrap();

    let banners = add(&mut s, &["--title", "Pay", "--amount", "1000", "--category", "Salary", "--type", "income", "--date", "2025-03-01"]);
    assert!(banners.is_empty());
    let banners = add(&mut s, &["--title", "Rent", "--amount", "400", "--category", "Other", "--date", "2025-03-02"]);
    assert!(banners.is_empty());
    let banners = add(&mut s, &["--title", "TV", "--amount", "200", "--category", "Other", "--date", "2025-03-03"]);
    assert_eq!(banners.len(), 1);
    assert!(banners[0].contains("60.00%"));
}

#[test]
fn disabled_rules_never_fire() {
    let mut s = session();
    add(&mut s, &["--title", "Pay", "--amount", "100", "--category", "Salary", "--type", "income", "--date", "2025-03-01"]);
    let banners = add(&mut s, &["--title", "Splurge", "--amount", "99", "--category", "Other", "--date", "2025-03-01"]);
    assert!(banners.is_empty());
    assert!(notifications::check(&s).is_empty());
}

#[test]
fn category_share_alert_names_the_category() {
    let mut s = session();
    run(&mut s, &["alerts", "set", "--rule", "c", "--on", "--percentage", "70"]).unwrap();
    add(&mut s, &["--title", "Bus", "--amount", "20", "--category", "Transport", "--date", "2025-03-04"]);
    let banners = add(&mut s, &["--title", "Feast", "--amount", "80", "--category", "Food", "--date", "2025-03-05"]);
    assert_eq!(banners.len(), 1);
    assert!(banners[0].contains("'Food'"));

    let outcomes = notifications::check(&s);
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].rule, AlertRuleKind::C);
    assert_eq!(outcomes[0].subject.as_deref(), Some("Food"));
}

#[test]
fn settings_validate_percentage_and_reminder_time() {
    let mut s = session();
    assert!(run(&mut s, &["alerts", "set", "--rule", "b", "--percentage", "120"]).is_err());
    assert!(run(&mut s, &["alerts", "set", "--rule", "b", "--percentage", "lots"]).is_err());
    run(&mut s, &["alerts", "set", "--rule", "B", "--percentage", "25"]).unwrap();
    let b = s.alerts.rule(AlertRuleKind::B);
    assert!(!b.enabled);
    assert_eq!(b.percentage, Decimal::from(25));

    assert!(run(&mut s, &["alerts", "time", "--at", "25:00"]).is_err());
    run(&mut s, &["alerts", "time", "--at", "21:15"]).unwrap();
    assert_eq!(s.reminder_at.unwrap().to_string(), "21:15:00");
    run(&mut s, &["alerts", "time", "--clear"]).unwrap();
    assert!(s.reminder_at.is_none());
}

#[test]
fn adding_outside_the_selected_period_is_called_out() {
    let mut s = session();
    run(&mut s, &["alerts", "set", "--rule", "b", "--on", "--percentage", "10"]).unwrap();
    add(&mut s, &["--title", "Pay", "--amount", "100", "--category", "Salary", "--type", "income", "--date", "2025-02-01"]);

    let notices = add(&mut s, &["--title", "Sofa", "--amount", "90", "--category", "Other", "--date", "2025-02-14"]);
    assert_eq!(notices.len(), 1);
    assert!(notices[0].contains("2025-02-14 is outside March 2025"));

    run(&mut s, &["period", "month", "--month", "2"]).unwrap();
    let notices = add(&mut s, &["--title", "Lamp", "--amount", "5", "--category", "Other", "--date", "2025-02-14"]);
    assert_eq!(notices.len(), 1);
    assert!(notices[0].contains("single day"));
}
