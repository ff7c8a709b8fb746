// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::in_period;
use crate::models::{DATE_TIME_FORMAT, Transaction, TxKind};
use crate::session::{Session, alert_banner};
use crate::utils::{fmt_money, maybe_print_json, parse_amount, parse_datetime, pretty_table};
use anyhow::{Context, Result};
use serde::Serialize;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            add(session, sub)?;
        }
        Some(("list", sub)) => list(session, sub)?,
        Some(("edit", sub)) => edit(session, sub)?,
        Some(("rm", sub)) => remove(session, sub)?,
        _ => {}
    }
    Ok(())
}

/// Adds the transaction and returns the notices it printed: a note when the
/// date falls outside the selected period, then the banners of any alert it
/// tripped.
pub fn add(session: &mut Session, sub: &clap::ArgMatches) -> Result<Vec<String>> {
    let title = sub.get_one::<String>("title").unwrap().trim().to_string();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    require_category(session, &category)?;
    let kind: TxKind = sub.get_one::<String>("type").unwrap().parse()?;
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_datetime(d)?,
        None => session.now(),
    };

    session.store.add_transaction(Transaction {
        title: title.clone(),
        amount,
        kind,
        category,
        date,
    })?;
    println!("Recorded {} {} '{}' on {}", kind, fmt_money(&amount), title, date);

    let mut notices = Vec::new();
    if !in_period(&date, &session.period) {
        let note = format!(
            "Note: {} is outside {}; alerts below only cover {}.",
            date.date(),
            session.period,
            session.period
        );
        tracing::debug!(date = %date, period = %session.period, "transaction outside selected period");
        println!("{}", note);
        notices.push(note);
    }

    let outcomes = session
        .alerts
        .evaluate_all(&session.store.snapshot(), &session.period, date.date());
    for o in outcomes.iter().filter(|o| o.fired) {
        let banner = alert_banner(o, session.alerts.rule(o.rule).percentage);
        tracing::info!(banner = %banner, "alert fired");
        println!("{}", banner);
        notices.push(banner);
    }
    Ok(notices)
}

fn list(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(session, sub.get_flag("period"));
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                let sign = if r.kind == TxKind::Income { "+" } else { "-" };
                vec![
                    r.index.to_string(),
                    r.date.clone(),
                    r.title.clone(),
                    format!("{}{}", sign, r.amount),
                    r.category.clone(),
                    r.kind.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["#", "Date", "Title", "Amount", "Category", "Type"], rows)
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    /// 1-based position, as accepted by `tx edit` and `tx rm`.
    pub index: usize,
    pub date: String,
    pub title: String,
    pub amount: String,
    pub category: String,
    pub kind: TxKind,
}

pub fn query_rows(session: &Session, period_only: bool) -> Vec<TransactionRow> {
    session
        .store
        .transactions()
        .iter()
        .enumerate()
        .filter(|(_, t)| !period_only || in_period(&t.date, &session.period))
        .map(|(i, t)| TransactionRow {
            index: i + 1,
            date: t.date.format(DATE_TIME_FORMAT).to_string(),
            title: t.title.clone(),
            amount: format!("{:.2}", t.amount),
            category: t.category.clone(),
            kind: t.kind,
        })
        .collect()
}

fn require_category(session: &Session, name: &str) -> Result<()> {
    if session.store.categories().iter().any(|c| c.name == name) {
        Ok(())
    } else {
        anyhow::bail!("Category '{}' not found", name)
    }
}

fn position(sub: &clap::ArgMatches) -> Result<usize> {
    let index = *sub.get_one::<usize>("index").unwrap();
    index
        .checked_sub(1)
        .context("Transaction numbers start at 1")
}

fn edit(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let pos = position(sub)?;
    let mut updated = session.store.transaction(pos)?.clone();
    if let Some(title) = sub.get_one::<String>("title") {
        updated.title = title.trim().to_string();
    }
    if let Some(amount) = sub.get_one::<String>("amount") {
        updated.amount = parse_amount(amount)?;
    }
    if let Some(category) = sub.get_one::<String>("category") {
        updated.category = category.trim().to_string();
        require_category(session, &updated.category)?;
    }
    if let Some(kind) = sub.get_one::<String>("type") {
        updated.kind = kind.parse()?;
    }
    if let Some(date) = sub.get_one::<String>("date") {
        updated.date = parse_datetime(date)?;
    }
    session.store.update_transaction(pos, updated)?;
    println!("Updated transaction {}", pos + 1);
    Ok(())
}

fn remove(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let pos = position(sub)?;
    let removed = session.store.remove_transaction(pos)?;
    println!("Removed transaction {} ('{}')", pos + 1, removed.title);
    Ok(())
}
