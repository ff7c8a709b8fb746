// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::charts::donut_chart;
use crate::engine::{
    CategoryTotal, PeriodFilter, Summary, compute_balance, compute_summary, totals_by_category,
};
use crate::models::TxKind;
use crate::session::Session;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;

pub fn handle(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    if let Some(d) = sub.get_one::<String>("direction") {
        session.direction = d.parse()?;
    }
    let view = build_view(session);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view)? {
        println!("{}", render(&view));
    }
    if let Some(path) = sub.get_one::<PathBuf>("html") {
        let handle = session.charts.replace(donut_chart(
            &view.categories,
            view.direction,
            &session.period,
        ));
        handle.write_html(path)?;
        println!("Chart written to {}", path.display());
    }
    Ok(())
}

pub fn handle_period(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let this_year = session.now().year();
    match sub.subcommand() {
        Some(("month", m)) => {
            let month = *m.get_one::<u32>("month").unwrap();
            let year = m.get_one::<i32>("year").copied().unwrap_or(this_year);
            session.period = PeriodFilter::month(year, month)?;
        }
        Some(("year", m)) => {
            let year = m.get_one::<i32>("year").copied().unwrap_or(this_year);
            session.period = PeriodFilter::Year { year };
        }
        Some(("all", _)) => session.period = PeriodFilter::All,
        _ => {}
    }
    println!("Period: {}", session.period);
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub period: String,
    pub direction: TxKind,
    /// All-time balance, unaffected by the period.
    pub balance: Decimal,
    pub summary: Summary,
    pub categories: Vec<CategoryTotal>,
}

pub fn build_view(session: &Session) -> DashboardView {
    let snapshot = session.store.snapshot();
    DashboardView {
        period: session.period.to_string(),
        direction: session.direction,
        balance: compute_balance(snapshot.transactions),
        summary: compute_summary(snapshot.period_transactions(&session.period)),
        categories: totals_by_category(&snapshot, session.direction, &session.period),
    }
}

pub fn render(view: &DashboardView) -> String {
    let totals = pretty_table(
        &["Balance", "Income", "Expenses"],
        vec![vec![
            fmt_money(&view.balance),
            fmt_money(&view.summary.total_income),
            fmt_money(&view.summary.total_expense),
        ]],
    );
    let heading = match view.direction {
        TxKind::Expense => "Expenses by category",
        TxKind::Income => "Income by category",
    };
    let rows = view
        .categories
        .iter()
        .map(|c| vec![c.label.clone(), fmt_money(&c.total), c.color.clone()])
        .collect();
    let breakdown = pretty_table(&["Category", "Total", "Color"], rows);
    format!(
        "Financial summary ({})\n{}\n{}\n{}",
        view.period, totals, heading, breakdown
    )
}
