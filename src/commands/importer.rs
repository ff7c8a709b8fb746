// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::exporter::CSV_HEADER;
use crate::models::{Transaction, TxKind};
use crate::session::Session;
use crate::store::Store;
use crate::utils::{parse_amount, parse_datetime};
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::path::Path;

const IMPORTED_CATEGORY_COLOR: &str = "#A78BFA";

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            let path = sub.get_one::<String>("path").unwrap().trim();
            let count = load_csv(&mut session.store, Path::new(path))?;
            println!("Imported {} transactions", count);
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Appends every row of an exported CSV to the store. Categories the store
/// does not know yet are created on the way. The whole file is parsed
/// before anything is added, so a bad row leaves the store untouched.
pub fn load_csv(store: &mut Store, path: &Path) -> Result<usize> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path.display()))?;

    let headers = rdr.headers()?.clone();
    let found: Vec<&str> = headers.iter().map(str::trim).collect();
    if found != CSV_HEADER {
        anyhow::bail!(
            "Unexpected CSV header '{}', expected '{}'",
            found.join(","),
            CSV_HEADER.join(",")
        );
    }

    let mut parsed = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let rec = result?;
        let line = i + 2;
        let title = rec.get(0).context("title missing")?.trim().to_string();
        let amount_raw = rec.get(1).context("amount missing")?.trim();
        let category = rec.get(2).context("category missing")?.trim().to_string();
        let kind_raw = rec.get(3).context("type missing")?;
        let date_raw = rec.get(4).context("date missing")?.trim();
        if title.is_empty() || category.is_empty() {
            anyhow::bail!("Line {}: title and category are required", line);
        }

        let amount = parse_amount(amount_raw)
            .with_context(|| format!("Line {}: invalid amount '{}'", line, amount_raw))?;
        let kind: TxKind = kind_raw
            .parse()
            .with_context(|| format!("Line {}: invalid type", line))?;
        let date = parse_datetime(date_raw)
            .with_context(|| format!("Line {}: invalid date '{}'", line, date_raw))?;
        parsed.push(Transaction {
            title,
            amount,
            kind,
            category,
            date,
        });
    }

    let count = parsed.len();
    for tx in parsed {
        if !store.categories().iter().any(|c| c.name == tx.category) {
            store.add_category(&tx.category, IMPORTED_CATEGORY_COLOR, Some(tx.kind))?;
        }
        store.add_transaction(tx)?;
    }
    tracing::info!(count, path = %path.display(), "transactions imported");
    Ok(count)
}
