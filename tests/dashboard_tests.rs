// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use pocketbook::commands::dashboard;
use pocketbook::engine::PeriodFilter;
use pocketbook::models::TxKind;
use pocketbook::session::{Clock, Session};
use pocketbook::{cli, db};
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::str::FromStr;

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

fn d(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn seed(s: &mut Session) {
    run(s, &["tx", "add", "--title", "Groceries", "--amount", "40", "--category", "Food", "--date", "2025-03-02"]).unwrap();
    run(s, &["tx", "add", "--title", "Snack", "--amount", "10", "--category", "Food", "--date", "2025-03-05"]).unwrap();
    run(s, &["tx", "add", "--title", "Payroll", "--amount", "100", "--category", "Salary", "--type", "income", "--date", "2025-03-01"]).unwrap();
    run(s, &["tx", "add", "--title", "Old train", "--amount", "25", "--category", "Transport", "--date", "2025-02-11"]).unwrap();
}

#[test]
fn dashboard_scopes_summary_to_period_but_not_balance() {
    let mut s = session();
    seed(&mut s);

    let view = dashboard::build_view(&s);
    assert_eq!(view.period, "March 2025");
    assert_eq!(view.summary.total_income, d("100"));
    assert_eq!(view.summary.total_expense, d("50"));
    assert_eq!(view.balance, d("25"));

    let labels: Vec<_> = view.categories.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, ["Food", "Transport", "Salary", "Other"]);
    let totals: Vec<_> = view.categories.iter().map(|c| c.total).collect();
    assert_eq!(totals, [d("50"), d("0"), d("0"), d("0")]);
}

#[test]
fn direction_and_period_switches_change_the_breakdown() {
    let mut s = session();
    seed(&mut s);

    run(&mut s, &["dashboard", "--direction", "income"]).unwrap();
    assert_eq!(s.direction, TxKind::Income);
    let view = dashboard::build_view(&s);
    let salary = view.categories.iter().find(|c| c.label == "Salary").unwrap();
    assert_eq!(salary.total, d("100"));

    run(&mut s, &["dashboard", "--direction", "expense"]).unwrap();
    run(&mut s, &["period", "month", "--month", "2"]).unwrap();
    assert_eq!(s.period, PeriodFilter::Month { year: 2025, month: 2 });
    let view = dashboard::build_view(&s);
    assert_eq!(view.summary.total_expense, d("25"));

    run(&mut s, &["period", "all"]).unwrap();
    let view = dashboard::build_view(&s);
    assert_eq!(view.period, "All time");
    assert_eq!(view.summary.total_expense, d("75"));
    assert_eq!(view.summary.net(), view.balance);
}

#[test]
fn deleted_category_drops_out_of_breakdown_but_keeps_transactions() {
    let mut s = session();
    seed(&mut s);
    run(&mut s, &["category", "rm", "--name", "Food"]).unwrap();

    assert_eq!(s.store.transactions().len(), 4);
    let view = dashboard::build_view(&s);
    assert!(view.categories.iter().all(|c| c.label != "Food"));
    assert_eq!(view.summary.total_expense, d("50"));
}

#[test]
fn html_flag_writes_a_donut_page() {
    let mut s = session();
    seed(&mut s);
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("donut.html");
    run(&mut s, &["dashboard", "--html", out.to_str().unwrap()]).unwrap();

    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.contains("echarts"));
    assert!(html.contains("Food"));
    assert!(s.charts.current().is_some());
}
