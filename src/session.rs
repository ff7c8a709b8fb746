// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The host side: owns the store, the view state and the settings connection,
//! and routes parsed commands to their handlers.

use crate::charts::ChartSlot;
use crate::commands;
use crate::engine::{AlertOutcome, AlertRuleKind, AlertSettings, PeriodFilter};
use crate::models::{Profile, TxKind};
use crate::store::Store;
use crate::utils::{fmt_money, fmt_percent, split_line};
use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::Connection;
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy)]
pub enum Clock {
    System,
    Fixed(NaiveDateTime),
}

impl Clock {
    pub fn now(&self) -> NaiveDateTime {
        match self {
            Clock::System => chrono::Local::now().naive_local(),
            Clock::Fixed(at) => *at,
        }
    }
}

pub struct Session {
    pub store: Store,
    pub conn: Connection,
    pub data_dir: PathBuf,
    pub clock: Clock,
    pub period: PeriodFilter,
    pub direction: TxKind,
    pub alerts: AlertSettings,
    pub profile: Profile,
    pub reminder_at: Option<NaiveTime>,
    last_reminder: Option<NaiveDate>,
    pub charts: ChartSlot,
}

impl Session {
    pub fn new(conn: Connection, data_dir: PathBuf, clock: Clock) -> Self {
        Session {
            store: Store::default(),
            conn,
            data_dir,
            clock,
            period: PeriodFilter::current_month(clock.now()),
            direction: TxKind::Expense,
            alerts: AlertSettings::default(),
            profile: Profile::default(),
            reminder_at: None,
            last_reminder: None,
            charts: ChartSlot::default(),
        }
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn dispatch(&mut self, matches: &clap::ArgMatches) -> Result<()> {
        match matches.subcommand() {
            Some(("dashboard", sub)) => commands::dashboard::handle(self, sub)?,
            Some(("period", sub)) => commands::dashboard::handle_period(self, sub)?,
            Some(("tx", sub)) => commands::transactions::handle(self, sub)?,
            Some(("category", sub)) => commands::categories::handle(self, sub)?,
            Some(("alerts", sub)) => commands::notifications::handle(self, sub)?,
            Some(("profile", sub)) => commands::profile::handle(self, sub)?,
            Some(("chart", sub)) => commands::charts::handle(self, sub)?,
            Some(("export", sub)) => commands::exporter::handle(self, sub)?,
            Some(("import", sub)) => commands::importer::handle(self, sub)?,
            _ => {}
        }
        Ok(())
    }

    /// Returns the reminder banner once per day after the configured time.
    pub fn due_reminder(&mut self) -> Option<String> {
        let at = self.reminder_at?;
        let now = self.now();
        if now.time() < at || self.last_reminder == Some(now.date()) {
            return None;
        }
        self.last_reminder = Some(now.date());
        let today = now.date();
        let (count, spent) = self
            .store
            .transactions()
            .iter()
            .filter(|t| t.date.date() == today)
            .fold((0usize, rust_decimal::Decimal::ZERO), |(n, s), t| {
                let s = if t.kind == TxKind::Expense { s.saturating_add(t.amount) } else { s };
                (n + 1, s)
            });
        Some(format!(
            "Reminder: {} transaction(s) recorded today, {} spent.",
            count,
            fmt_money(&spent)
        ))
    }

    /// Reads commands until EOF or `quit`. Errors are printed, not fatal.
    pub fn run_shell<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> Result<()> {
        writeln!(out, "pocketbook shell. Type 'help' for commands, 'quit' to leave.")?;
        for line in input.lines() {
            let line = line?;
            let words = match split_line(&line) {
                Ok(w) if w.is_empty() => continue,
                Ok(w) => w,
                Err(err) => {
                    writeln!(out, "error: {:#}", err)?;
                    continue;
                }
            };
            let matches = match crate::cli::build_shell().try_get_matches_from(words) {
                Ok(m) => m,
                Err(err) => {
                    writeln!(out, "{}", err.render())?;
                    continue;
                }
            };
            if matches!(matches.subcommand(), Some(("quit", _))) {
                break;
            }
            if let Err(err) = self.dispatch(&matches) {
                tracing::warn!(error = %err, "command failed");
                writeln!(out, "error: {:#}", err)?;
            }
            if let Some(banner) = self.due_reminder() {
                writeln!(out, "{}", banner)?;
            }
            match commands::exporter::run_scheduled_export(self) {
                Ok(Some(path)) => writeln!(out, "Automatic export written to {}", path.display())?,
                Ok(None) => {}
                Err(err) => writeln!(out, "error: automatic export failed: {:#}", err)?,
            }
            out.flush()?;
        }
        Ok(())
    }
}

/// Banner text for a fired alert.
pub fn alert_banner(outcome: &AlertOutcome, threshold: rust_decimal::Decimal) -> String {
    let pct = fmt_percent(outcome.percentage);
    match outcome.rule {
        AlertRuleKind::A => format!(
            "Alert! You have spent {} of your income, above the {}% limit.",
            pct, threshold
        ),
        AlertRuleKind::B => format!(
            "Alert! You spent {} of your income in a single day, above the {}% limit.",
            pct, threshold
        ),
        AlertRuleKind::C => format!(
            "Alert! '{}' takes {} of your expenses, above the {}% limit.",
            outcome.subject.as_deref().unwrap_or("?"),
            pct,
            threshold
        ),
    }
}
