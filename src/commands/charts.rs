// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::charts::{category_evolution_chart, total_evolution_chart};
use crate::engine::{EngineError, SeriesDirection, category_daily_series, daily_totals};
use crate::session::Session;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use std::path::PathBuf;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("total", sub)) => total(session, sub)?,
        Some(("category", sub)) => category(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn total(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let days = match daily_totals(session.store.transactions()) {
        Ok(days) => days,
        Err(EngineError::InsufficientData) => {
            session.charts.clear();
            println!("Not enough data to build the chart yet.");
            return Ok(());
        }
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &days)? {
        let rows = days
            .iter()
            .map(|d| vec![d.day.to_string(), fmt_money(&d.income), fmt_money(&d.expense)])
            .collect();
        println!("{}", pretty_table(&["Date", "Income", "Expenses"], rows));
    }
    if let Some(path) = sub.get_one::<PathBuf>("html") {
        session
            .charts
            .replace(total_evolution_chart(&days))
            .write_html(path)?;
        println!("Chart written to {}", path.display());
    }
    Ok(())
}

fn category(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim();
    let series = category_daily_series(session.store.transactions(), name);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &series)? {
        match series.direction {
            None => println!("No transactions in '{}' yet.", name),
            Some(SeriesDirection::Mixed) => println!(
                "Note: '{}' mixes income and expenses; values are summed magnitudes.",
                name
            ),
            Some(_) => {}
        }
        let rows = series
            .points
            .iter()
            .map(|(day, v)| vec![day.to_string(), fmt_money(v)])
            .collect();
        println!("{}", pretty_table(&["Date", name], rows));
    }
    if let Some(path) = sub.get_one::<PathBuf>("html") {
        session
            .charts
            .replace(category_evolution_chart(&series))
            .write_html(path)?;
        println!("Chart written to {}", path.display());
    }
    Ok(())
}
