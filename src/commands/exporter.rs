// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::exports_dir;
use crate::models::{DATE_TIME_FORMAT, Transaction};
use crate::schedule::{self, ExportConfig, Frequency};
use crate::session::Session;
use crate::utils::pretty_table;
use anyhow::{Context, Result};
use serde_json::json;
use std::path::{Path, PathBuf};

pub const CSV_HEADER: [&str; 5] = ["Title", "Amount", "Category", "Type", "Date"];

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(session, sub),
        Some(("schedule", sub)) => handle_schedule(session, sub),
        _ => Ok(()),
    }
}

fn export_transactions(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = Path::new(sub.get_one::<String>("out").unwrap());
    let txs = session.store.transactions();

    match fmt.as_str() {
        "csv" => write_csv(txs, out)?,
        "json" => write_json(txs, out)?,
        _ => anyhow::bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported {} transactions to {}", txs.len(), out.display());
    Ok(())
}

/// Writes transactions in store order under the `Title,Amount,Category,Type,Date` header.
pub fn write_csv(txs: &[Transaction], out: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(out)
        .with_context(|| format!("Create CSV {}", out.display()))?;
    wtr.write_record(CSV_HEADER)?;
    for t in txs {
        wtr.write_record([
            t.title.clone(),
            t.amount.to_string(),
            t.category.clone(),
            t.kind.to_string(),
            t.date.format(DATE_TIME_FORMAT).to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_json(txs: &[Transaction], out: &Path) -> Result<()> {
    let items: Vec<_> = txs
        .iter()
        .map(|t| {
            json!({
                "title": t.title,
                "amount": t.amount.to_string(),
                "category": t.category,
                "type": t.kind,
                "date": t.date.format(DATE_TIME_FORMAT).to_string(),
            })
        })
        .collect();
    std::fs::write(out, serde_json::to_string_pretty(&items)?)
        .with_context(|| format!("Write {}", out.display()))?;
    Ok(())
}

fn handle_schedule(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {}
        Some(("set", sub)) => {
            let frequency: Frequency = sub.get_one::<String>("frequency").unwrap().parse()?;
            let config = ExportConfig {
                enabled: true,
                frequency,
                sub_frequency: sub.get_one::<String>("on").map(|s| s.trim().to_string()),
            };
            config.validate()?;
            schedule::save_config(&session.conn, &config)?;
            println!("Automatic export enabled.");
        }
        Some(("off", _)) => {
            let mut config = schedule::load_config(&session.conn)?;
            config.enabled = false;
            schedule::save_config(&session.conn, &config)?;
            println!("Automatic export disabled.");
        }
        _ => return Ok(()),
    }

    let config = schedule::load_config(&session.conn)?;
    let last = schedule::last_export(&session.conn)?;
    println!(
        "{}",
        pretty_table(
            &["Enabled", "Frequency", "On", "Last export"],
            vec![vec![
                config.enabled.to_string(),
                config.frequency.to_string(),
                config.sub_frequency.unwrap_or_default(),
                last.map(|d| d.format(DATE_TIME_FORMAT).to_string())
                    .unwrap_or_else(|| "never".into()),
            ]],
        )
    );
    Ok(())
}

/// Writes `exports/transactions_YYYY-MM-DD.csv` when the schedule says an
/// export is due today, and records when it happened. An empty ledger is
/// not exported, so a later session with data can still export that day.
pub fn run_scheduled_export(session: &Session) -> Result<Option<PathBuf>> {
    let config = schedule::load_config(&session.conn)?;
    let now = session.now();
    let last = schedule::last_export(&session.conn)?;
    if !schedule::is_export_due(&config, now, last) {
        tracing::debug!(enabled = config.enabled, frequency = %config.frequency, "no export due");
        return Ok(None);
    }
    if session.store.transactions().is_empty() {
        tracing::info!("export due but there are no transactions yet, skipping");
        return Ok(None);
    }
    let path = exports_dir(&session.data_dir)?
        .join(format!("transactions_{}.csv", now.format("%Y-%m-%d")));
    write_csv(session.store.transactions(), &path)?;
    schedule::record_export(&session.conn, now)?;
    tracing::info!(path = %path.display(), "automatic export written");
    Ok(Some(path))
}
